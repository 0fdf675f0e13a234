use std::collections::HashMap;

use tracing::warn;

use crate::{
    advice::AdviceParser,
    hazard::HazardClassifier,
    model::{AdviceBatch, Alert, ClassifiedAdvice, Observation, Station},
};

/// Turns a batch of advisory lines plus station side data into display-ready
/// records.
#[derive(Debug, Clone, Default)]
pub struct AdviceEngine {
    parser: AdviceParser,
    classifier: HazardClassifier,
}

impl AdviceEngine {
    pub fn new(parser: AdviceParser, classifier: HazardClassifier) -> Self {
        Self { parser, classifier }
    }

    pub fn parser(&self) -> &AdviceParser {
        &self.parser
    }

    pub fn classifier(&self) -> &HazardClassifier {
        &self.classifier
    }

    /// `lines[i]` is paired with `stations[i]`; unpaired entries on either side
    /// produce no record. Output keeps station order.
    pub fn run(
        &self,
        lines: &[String],
        stations: &[Station],
        observations_by_station: &HashMap<String, Vec<Observation>>,
        alerts_by_station: &HashMap<String, Vec<Alert>>,
    ) -> Vec<ClassifiedAdvice> {
        if lines.len() != stations.len() {
            warn!(
                lines = lines.len(),
                stations = stations.len(),
                "advisory lines and stations differ in count, unpaired entries are skipped"
            );
        }

        lines
            .iter()
            .zip(stations)
            .map(|(line, station)| {
                let observations = observations_by_station
                    .get(&station.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                let alerts = alerts_by_station
                    .get(&station.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();

                self.classifier
                    .classify(self.parser.parse(line), observations, alerts)
            })
            .collect()
    }

    pub fn run_batch(&self, batch: &AdviceBatch) -> Vec<ClassifiedAdvice> {
        self.run(
            &batch.lines,
            &batch.stations,
            &batch.observations,
            &batch.alerts,
        )
    }
}
