//! Terminal collaborators around the wildfire core: session controls, the
//! auto-run loop, chart series and text rendering.

pub mod auto_run;
pub mod history;
pub mod render;
pub mod session;

pub use auto_run::{AutoRun, RunOutcome, StepObserver};
pub use history::History;
pub use render::GridView;
pub use session::{ForestState, Session, SharedForest};
