pub mod assignments;

pub mod grades;

pub mod teams;

pub use assignments::configure_assignments_routes;
pub use grades::configure_grades_routes;
pub use teams::configure_teams_routes;
