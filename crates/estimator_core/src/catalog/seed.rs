//! Built-in reference tables.

use crate::model::recipe::Recipe;
use crate::model::role::Role;
use crate::model::task::Task;

pub(super) const DEFAULT_ROLE_ID: &str = "sr-associate";

pub(super) fn roles() -> Vec<Role> {
    [
        ("associate", "Associate", 91.08),
        ("sr-associate", "Sr. Associate", 98.52),
        ("senior", "Senior", 114.10),
        ("principal", "Principal", 176.39),
        ("fellow", "Fellow", 184.02),
        ("manager", "Manager", 184.02),
        ("vp", "VP", 202.14),
        ("executive", "Executive", 240.74),
    ]
    .into_iter()
    .map(|(id, title, rate)| Role::new(id, title, rate))
    .collect()
}

pub(super) fn task_library() -> Vec<Task> {
    [
        ("project-management", "Project Management", 50.0),
        ("wireframes", "Wireframes", 10.0),
        ("ui-design", "UI Design", 20.0),
        ("prototyping", "Prototyping", 15.0),
        ("user-interviews", "User Interviews", 12.0),
        ("dev-docs", "Development Docs", 8.0),
        ("internal-kickoff", "Internal Kick-off Meeting", 3.0),
        ("external-kickoff", "External Kick-off Meeting", 5.0),
        ("research-synthesis", "Research Synthesis", 60.0),
        ("research-plan", "Develop Research Plan", 4.0),
        ("review-materials", "Review Client Provided Materials", 40.0),
        ("findings-docs", "Develop Findings Docs", 10.0),
        ("creative-brief", "Develop Creative Brief", 5.0),
        ("lowfi-map", "Develop Low-fi Map Wireframe", 10.0),
        ("content-vision", "Refine Content & Vision", 20.0),
        ("midfi-map", "Develop Mid-fi Map Wireframe", 40.0),
        ("highfi-map", "Develop High-fi Map Wireframe", 20.0),
        ("client-handoff", "Conduct Final Client Hand-off", 6.0),
        ("user-testing", "User Testing Sessions", 16.0),
        ("accessibility-audit", "Accessibility Audit", 8.0),
        ("design-system", "Design System Development", 24.0),
        ("stakeholder-interviews", "Stakeholder Interviews", 10.0),
        ("competitive-analysis", "Competitive Analysis", 12.0),
    ]
    .into_iter()
    .map(|(id, name, hours)| Task::new(id, name, hours))
    .collect()
}

pub(super) fn recipes() -> Vec<Recipe> {
    vec![
        recipe(
            "app-design",
            "App Design Recipe",
            "A complete recipe for designing a mobile or web application from user research to hi-fidelity mockups.",
            &[
                ("project-management", "Project Management", 50.0),
                ("user-interviews", "Conduct User Interviews", 12.0),
                ("insights", "Develop Insights and Findings", 10.0),
                ("concepts-wireframes", "Define Concepts and Wireframes", 15.0),
                ("user-testing", "Conduct User Testing", 12.0),
                ("hifi-mockups", "Develop Hi-Fidelity Mockups", 20.0),
                ("dev-docs", "Provide Development Documentation", 8.0),
            ],
        ),
        recipe(
            "strategy-map",
            "Strategy Map Recipe",
            "A comprehensive recipe for developing a strategic map from research to final deliverable.",
            &[
                ("project-management", "Project Management", 50.0),
                ("kickoff", "Kick Off", 7.0),
                ("framing-questions", "Develop Framing Questions", 4.0),
                ("review-materials", "Review Client-provided Materials", 40.0),
                ("discovery-session", "Conduct Discovery Session", 4.0),
                ("research-synthesis", "Complete Research Synthesis", 60.0),
                ("findings-docs", "Develop Finding Documentation", 10.0),
                ("present-findings", "Present Findings", 2.0),
                ("creative-brief", "Develop Creative Brief", 5.0),
                ("lowfi-map", "Develop Low-fi Map Wireframe", 10.0),
                ("content-vision", "Refine Content & Vision", 20.0),
                ("midfi-map", "Develop Mid-fi Map Wireframe", 40.0),
                ("highfi-map", "Develop High-fi Map Wireframe", 20.0),
                ("client-handoff", "Conduct Final Client Hand-off", 6.0),
            ],
        ),
        recipe(
            "design-system",
            "Design System Development",
            "A comprehensive recipe for creating a design system from scratch, including documentation and component library.",
            &[
                ("project-management", "Project Management", 50.0),
                ("stakeholder-interviews", "Stakeholder Interviews", 10.0),
                ("competitive-analysis", "Competitive Analysis", 12.0),
                ("design-system", "Design System Development", 24.0),
                ("component-docs", "Component Documentation", 16.0),
                ("accessibility-audit", "Accessibility Audit", 8.0),
                ("user-testing", "User Testing Sessions", 16.0),
            ],
        ),
    ]
}

fn recipe(id: &str, name: &str, description: &str, tasks: &[(&str, &str, f64)]) -> Recipe {
    let tasks = tasks
        .iter()
        .map(|(task_id, task_name, hours)| Task::new(format!("{id}/{task_id}"), *task_name, *hours))
        .collect();
    Recipe::new(id, name, description, tasks)
}
