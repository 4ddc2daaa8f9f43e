//! Screen implementations: the root dashboard plus its modal sub-views.

pub mod dashboard;
pub mod policy_editor;
pub mod topology;

pub use dashboard::DashboardScreen;
pub use policy_editor::PolicyEditor;
pub use topology::TopologyScreen;
