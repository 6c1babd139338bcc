//! Floor motions: catalog, queue, and the resolution workflow

pub mod queue;
pub mod registry;
pub mod workflow;

pub use queue::{MotionQueue, OrderedView, QueuedMotion};
pub use registry::{CATALOG, Motion, MotionId, MotionParameters, ParameterName, find_motion};
pub use workflow::{MotionWorkflow, Resolution, WorkflowState};
