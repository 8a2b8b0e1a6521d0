use crate::MeasurementId;

/// Hands out measurement ids for one graph: 1, 2, 3, ...
#[derive(Debug)]
pub struct MeasurementSequence {
    issued: u32,
}

impl MeasurementSequence {
    pub fn new() -> Self {
        Self { issued: 0 }
    }

    pub fn next_id(&mut self) -> MeasurementId {
        self.issued += 1;
        MeasurementId(self.issued)
    }

    pub fn issued(&self) -> u32 {
        self.issued
    }

    pub fn last(&self) -> Option<MeasurementId> {
        (self.issued > 0).then_some(MeasurementId(self.issued))
    }
}

impl Default for MeasurementSequence {
    fn default() -> Self {
        Self::new()
    }
}
