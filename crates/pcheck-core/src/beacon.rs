//! The collection pipeline: resolve, extract, attach context, send

use std::rc::Rc;

use crate::config::BeaconConfig;
use crate::lifecycle::{LifecycleTrigger, PageHost, TriggerMode};
use crate::log::Diagnostics;
use crate::record::{MetricRecord, PageContext};
use crate::resolver::{resolve_tracking_code, EmbeddingContext};
use crate::timing::{detect_timing, TimingProbe, TimingSource};
use crate::transmit::{skip_message, Delivery, Transmitter, Transport};

pub struct Beacon<E, P, T> {
    embedding: E,
    probe: P,
    transmitter: Transmitter<T>,
    diagnostics: Diagnostics,
}

impl<E, P, T> Beacon<E, P, T>
where
    E: EmbeddingContext,
    P: TimingProbe,
    T: Transport,
{
    pub fn new(
        config: &BeaconConfig,
        embedding: E,
        probe: P,
        transport: T,
        diagnostics: Diagnostics,
    ) -> Self {
        let transmitter = Transmitter::new(config.collection_url(), transport, diagnostics.clone());
        Self {
            embedding,
            probe,
            transmitter,
            diagnostics,
        }
    }

    pub fn transmitter(&self) -> &Transmitter<T> {
        &self.transmitter
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Build this page view's record and send it once.
    pub async fn collect(&self) -> Delivery {
        let tracking_code = match resolve_tracking_code(&self.embedding, &self.diagnostics) {
            Some(code) if !code.is_empty() => code,
            _ => {
                tracing::debug!("no tracking code on the embedding tag");
                self.diagnostics.log(&skip_message());
                return Delivery::Skipped;
            }
        };

        let timing = match detect_timing(&self.probe) {
            Ok(timing) => timing,
            Err(e) => {
                tracing::warn!(error = %e, "no timing source");
                self.diagnostics
                    .error(&format!("Error collecting performance data: {}", e));
                return Delivery::Failed(e.to_string());
            }
        };
        tracing::debug!(source = timing.kind(), "timing source selected");

        let context = PageContext::new(
            Some(tracking_code),
            self.embedding.page_path(),
            self.embedding.page_host(),
        );
        let record = MetricRecord::new(timing.timing_metrics(), context);

        self.transmitter.send(&record).await
    }
}

impl<E, P, T> Beacon<E, P, T>
where
    E: EmbeddingContext + 'static,
    P: TimingProbe + 'static,
    T: Transport + 'static,
{
    /// Arm `trigger` so the pipeline runs as a detached task after load.
    pub fn install<H>(self: Rc<Self>, host: &Rc<H>, trigger: &LifecycleTrigger) -> TriggerMode
    where
        H: PageHost + ?Sized + 'static,
    {
        let spawn_host = Rc::clone(host);
        trigger.arm(host, move || {
            spawn_host.spawn(Box::pin(async move {
                let outcome = self.collect().await;
                tracing::debug!(?outcome, "beacon finished");
            }));
        })
    }
}
