mod central_panel;
mod notes_panel;
mod tools_panel;

pub use central_panel::central_panel;
pub use notes_panel::notes_panel;
pub use tools_panel::tools_panel;
