//! Asynchronous pipeline execution with staleness guards.
//!
//! Every parameter change submits a fresh pipeline run tagged with a
//! per-layer generation number. Runs execute on blocking threads and may
//! finish out of order under rapid parameter churn; the single arbiter is
//! [`Processor::apply`], which drops any completion older than the
//! layer's latest requested generation. The freshest request therefore
//! always wins, no matter how slowly it computes.

use std::collections::HashMap;
use std::sync::Arc;

use mono_dither::Bitmap;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

use crate::models::{EffectParams, LayerId, LayerRegistry};
use crate::rendering::pipeline::{self, Artifact};

/// One finished pipeline run, delivered back to the host loop.
#[derive(Debug, Clone)]
pub struct Completion {
    pub layer: LayerId,
    pub generation: u64,
    pub artifact: Artifact,
}

#[derive(Debug)]
pub struct Processor {
    generations: Arc<Mutex<HashMap<LayerId, u64>>>,
    completions: mpsc::UnboundedSender<Completion>,
}

impl Processor {
    /// Returns the processor and the receiver the host drains for
    /// completions.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                generations: Arc::new(Mutex::new(HashMap::new())),
                completions: tx,
            },
            rx,
        )
    }

    /// Queues a pipeline run for a layer and returns its generation.
    ///
    /// The run executes on a blocking thread. Failures are logged and
    /// produce no completion, so the layer keeps showing its previous
    /// content rather than a broken artifact.
    pub async fn submit(&self, layer: LayerId, source: Bitmap, params: EffectParams) -> u64 {
        let generation = {
            let mut generations = self.generations.lock().await;
            let counter = generations.entry(layer).or_insert(0);
            *counter += 1;
            *counter
        };

        let tx = self.completions.clone();
        tokio::spawn(async move {
            let result =
                tokio::task::spawn_blocking(move || pipeline::process_source(&source, &params))
                    .await;
            match result {
                Ok(Ok(artifact)) => {
                    let _ = tx.send(Completion {
                        layer,
                        generation,
                        artifact,
                    });
                }
                Ok(Err(e)) => {
                    warn!(layer = %layer, generation, error = %e, "pipeline run failed");
                }
                Err(e) => {
                    warn!(layer = %layer, generation, error = %e, "pipeline task aborted");
                }
            }
        });
        generation
    }

    /// Applies a completion to the registry unless it has been superseded.
    /// Returns true when the artifact was stored.
    pub async fn apply(&self, layers: &mut LayerRegistry, completion: Completion) -> bool {
        let latest = {
            let generations = self.generations.lock().await;
            generations.get(&completion.layer).copied().unwrap_or(0)
        };
        if completion.generation < latest {
            debug!(
                layer = %completion.layer,
                generation = completion.generation,
                latest,
                "discarding stale pipeline result"
            );
            return false;
        }

        match layers.get_mut(completion.layer) {
            Some(layer) => {
                layer.processed = Some(completion.artifact.png);
                layer.armed = true;
                true
            }
            None => {
                debug!(layer = %completion.layer, "completion for deleted layer dropped");
                false
            }
        }
    }

    /// Forgets a layer's generation tracking after it is deleted.
    pub async fn forget(&self, layer: LayerId) {
        self.generations.lock().await.remove(&layer);
    }

    /// Latest generation requested for a layer (0 if never submitted).
    pub async fn latest_generation(&self, layer: LayerId) -> u64 {
        self.generations
            .lock()
            .await
            .get(&layer)
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use std::time::Duration;

    fn registry_with_layer() -> (LayerRegistry, LayerId) {
        let mut layers = LayerRegistry::new();
        let id = layers.add("asset", Bitmap::filled(4, 4, [10, 10, 10, 255]), Vec2::ZERO);
        (layers, id)
    }

    fn params(accent: &str) -> EffectParams {
        EffectParams::parse("atkinson", 1, 1.0, accent).unwrap()
    }

    #[tokio::test]
    async fn test_submit_apply_round_trip() {
        let (processor, mut rx) = Processor::new();
        let (mut layers, id) = registry_with_layer();

        let generation = processor
            .submit(id, Bitmap::filled(4, 4, [10, 10, 10, 255]), params("#FF0000"))
            .await;
        assert_eq!(generation, 1);

        let completion = rx.recv().await.unwrap();
        assert_eq!(completion.layer, id);
        assert_eq!(completion.generation, 1);

        assert!(processor.apply(&mut layers, completion).await);
        let layer = layers.get(id).unwrap();
        assert!(layer.armed);
        assert!(layer.processed.is_some());
    }

    #[tokio::test]
    async fn test_stale_completion_is_discarded() {
        let (processor, _rx) = Processor::new();
        let (mut layers, id) = registry_with_layer();
        let source = Bitmap::filled(4, 4, [10, 10, 10, 255]);

        let first = processor.submit(id, source.clone(), params("#FF0000")).await;
        let second = processor.submit(id, source.clone(), params("#00FF00")).await;
        assert!(second > first);

        let green = pipeline::process_source(&source, &params("#00FF00")).unwrap();
        let red = pipeline::process_source(&source, &params("#FF0000")).unwrap();

        // The newer result lands first; the older one finishes late and
        // must not overwrite it.
        assert!(
            processor
                .apply(
                    &mut layers,
                    Completion {
                        layer: id,
                        generation: second,
                        artifact: green.clone(),
                    },
                )
                .await
        );
        assert!(
            !processor
                .apply(
                    &mut layers,
                    Completion {
                        layer: id,
                        generation: first,
                        artifact: red,
                    },
                )
                .await
        );

        let layer = layers.get(id).unwrap();
        assert_eq!(layer.processed.as_deref(), Some(green.png.as_slice()));
    }

    #[tokio::test]
    async fn test_failed_run_emits_nothing() {
        let (processor, mut rx) = Processor::new();
        let (_layers, id) = registry_with_layer();

        // pixel_scale larger than the image guarantees a degenerate scale.
        let tiny = Bitmap::filled(2, 2, [10, 10, 10, 255]);
        let bad = EffectParams::parse("atkinson", 20, 1.0, "#FF0000").unwrap();
        processor.submit(id, tiny, bad).await;

        let waited = tokio::time::timeout(Duration::from_millis(300), rx.recv()).await;
        assert!(waited.is_err(), "failed runs must stay silent");
    }

    #[tokio::test]
    async fn test_completion_for_deleted_layer_is_dropped() {
        let (processor, mut rx) = Processor::new();
        let (mut layers, id) = registry_with_layer();

        processor
            .submit(id, Bitmap::filled(4, 4, [10, 10, 10, 255]), params("#FF0000"))
            .await;
        let completion = rx.recv().await.unwrap();

        layers.remove(id);
        processor.forget(id).await;
        assert!(!processor.apply(&mut layers, completion).await);
        assert_eq!(processor.latest_generation(id).await, 0);
    }
}
