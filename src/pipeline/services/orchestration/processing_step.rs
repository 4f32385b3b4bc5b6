use super::makeup_context::MakeupContext;
use crate::error::AppError;

/// Chain of Responsibility pattern for processing pipeline
///
/// Steps are synchronous: every stage is a pure transformation over the
/// context, so there is nothing to await inside a request.
pub trait ProcessingStep: Send + Sync {
    fn process(&self, context: &mut MakeupContext) -> Result<(), AppError>;
    fn name(&self) -> &'static str;
}

/// A pipeline that processes requests through a chain of steps
pub struct ProcessingPipeline {
    steps: Vec<Box<dyn ProcessingStep>>,
}

impl ProcessingPipeline {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn add_step(mut self, step: Box<dyn ProcessingStep>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn process(&self, mut context: MakeupContext) -> Result<MakeupContext, AppError> {
        for step in &self.steps {
            tracing::debug!("Processing step: {}", step.name());
            step.process(&mut context)?;
        }
        Ok(context)
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Default for ProcessingPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::services::orchestration::StepInstrumentation;
    use crate::pipeline::types::{FaceImage, LandmarkMap};
    use image::{ImageBuffer, Rgb};

    struct Fails;

    impl ProcessingStep for Fails {
        fn process(&self, _context: &mut MakeupContext) -> Result<(), AppError> {
            Err(AppError::Pipeline("boom".to_string()))
        }

        fn name(&self) -> &'static str {
            "Fails"
        }
    }

    struct Marks;

    impl ProcessingStep for Marks {
        fn process(&self, context: &mut MakeupContext) -> Result<(), AppError> {
            context.record_timing("marks-ran", 0);
            Ok(())
        }

        fn name(&self) -> &'static str {
            "Marks"
        }
    }

    fn context() -> MakeupContext {
        let image = FaceImage::from_rgb(ImageBuffer::from_pixel(2, 2, Rgb([1, 2, 3])));
        MakeupContext::new(image, LandmarkMap::new())
    }

    #[test]
    fn stops_at_first_failing_step() {
        let pipeline = ProcessingPipeline::new()
            .add_step(Box::new(Fails.instrumented("fails")))
            .add_step(Box::new(Marks));
        assert_eq!(pipeline.step_names(), ["Fails", "Marks"]);
        assert!(matches!(pipeline.process(context()), Err(AppError::Pipeline(_))));
    }

    #[test]
    fn instrumented_steps_record_their_timing() {
        let pipeline = ProcessingPipeline::new()
            .add_step(Box::new(Marks.instrumented("mark")));
        let ctx = pipeline.process(context()).unwrap();
        let keys: Vec<&str> = ctx.timings.keys().map(String::as_str).collect();
        assert_eq!(keys, ["marks-ran", "mark"]);
    }

    #[test]
    fn outcome_needs_every_step() {
        let err = context().into_outcome().unwrap_err();
        assert!(err.to_string().contains("not available"));
    }
}
