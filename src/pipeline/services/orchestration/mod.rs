pub mod instrumented_step;
pub mod makeup_context;
pub mod processing_step;

pub use instrumented_step::{InstrumentedStep, StepInstrumentation};
pub use makeup_context::MakeupContext;
pub use processing_step::{ProcessingPipeline, ProcessingStep};
