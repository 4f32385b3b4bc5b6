use futures::future::BoxFuture;
use futures::task::{Context, Poll};
use tower::Service;

use crate::error::AppError;
use crate::pipeline::services::makeup_engine::MakeupEngine;
use crate::pipeline::types::{MakeupOutcome, MakeupRequest};

/// Async front door to [`MakeupEngine`].
///
/// Rendering is CPU-bound, so each call runs on the blocking pool.
#[derive(Debug, Clone)]
pub struct MakeupService {
    engine: MakeupEngine,
}

impl MakeupService {
    pub fn new(engine: MakeupEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &MakeupEngine {
        &self.engine
    }
}

impl Service<MakeupRequest> for MakeupService {
    type Response = MakeupOutcome;
    type Error = AppError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: MakeupRequest) -> Self::Future {
        let engine = self.engine.clone();
        Box::pin(async move {
            let request_id = request.id;
            tokio::task::spawn_blocking(move || engine.process(request))
                .await
                .map_err(|e| {
                    tracing::error!(request = %request_id, "Render task failed: {}", e);
                    AppError::Pipeline(format!("render task failed: {e}"))
                })?
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderSettings;
    use crate::pipeline::types::{Color, FaceImage, FeatureRegions, LandmarkMap, Palette, PixelPoint};
    use image::{ImageBuffer, Rgb};
    use indexmap::IndexMap;
    use tower::ServiceExt;

    fn service() -> MakeupService {
        let mut table = IndexMap::new();
        table.insert("FACE".to_string(), vec![0, 1, 2]);
        let regions = FeatureRegions::new(table, vec![], vec![0, 1, 2]);
        let palette = Palette::from_colors(
            &[Color::new(180, 140, 120)],
            &[Color::new(90, 70, 120)],
            &[Color::new(170, 40, 60)],
        );
        MakeupService::new(MakeupEngine::new(palette, regions, RenderSettings::default()))
    }

    fn triangle() -> LandmarkMap {
        [
            (0, PixelPoint::new(1, 1)),
            (1, PixelPoint::new(8, 1)),
            (2, PixelPoint::new(4, 8)),
        ]
        .into_iter()
        .collect()
    }

    #[tokio::test]
    async fn renders_through_tower() {
        let image = FaceImage::from_rgb(ImageBuffer::from_pixel(10, 10, Rgb([200, 160, 150])));
        let request = MakeupRequest::new(image, Some(triangle()));
        let id = request.id;

        let outcome = service().oneshot(request).await.unwrap();
        assert_eq!(outcome.report.request_id, id);
        assert_eq!(outcome.report.skin_color, Color::new(200, 160, 150));
        assert_eq!(outcome.report.swatches.foundation, Color::new(180, 140, 120));
        // Outside every polygon.
        assert_eq!(outcome.image.pixels().get_pixel(9, 9).0, [200, 160, 150]);
        assert_ne!(outcome.image.pixels().get_pixel(4, 3).0, [200, 160, 150]);
    }

    #[tokio::test]
    async fn no_face_is_reported() {
        let image = FaceImage::from_rgb(ImageBuffer::from_pixel(10, 10, Rgb([0, 0, 0])));
        let result = service().oneshot(MakeupRequest::new(image, None)).await;
        assert!(matches!(result, Err(AppError::NoFaceDetected)));
    }

    #[tokio::test]
    async fn serves_concurrent_requests_from_one_engine() {
        let svc = service();
        let shades = [60u8, 120, 240];
        let calls = shades.map(|shade| {
            let image = FaceImage::from_rgb(ImageBuffer::from_pixel(10, 10, Rgb([shade, shade, shade])));
            svc.clone().oneshot(MakeupRequest::new(image, Some(triangle())))
        });
        let outcomes = futures::future::join_all(calls).await;
        for (outcome, shade) in outcomes.into_iter().zip(shades) {
            assert_eq!(outcome.unwrap().report.skin_color, Color::new(shade, shade, shade));
        }
    }
}
