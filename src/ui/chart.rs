//! Status-distribution chart over the candidate list.

use crate::domain::candidate::Candidate;
use crate::domain::types::CandidateStatus;

/// The three buckets of the dashboard doughnut.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusBucket {
    Pending,
    InProcess,
    Other,
}

/// Total classification of a candidate status: the new/pending sentinel
/// counts as pending, the rejected sentinel as other, everything else as
/// in-process. Missing statuses already defaulted to the sentinel on read.
pub fn classify(status: CandidateStatus) -> StatusBucket {
    match status {
        CandidateStatus::Nuevo => StatusBucket::Pending,
        CandidateStatus::Rechazado => StatusBucket::Other,
        _ => StatusBucket::InProcess,
    }
}

/// Computed distribution backing one drawn chart.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusChart {
    pub pending: usize,
    pub in_process: usize,
    pub other: usize,
}

impl StatusChart {
    pub const PENDING_LABEL: &'static str = "Pendiente";
    pub const IN_PROCESS_LABEL: &'static str = "Agendado";
    pub const OTHER_LABEL: &'static str = "Otro";

    pub fn from_candidates(candidates: &[Candidate]) -> Self {
        let mut chart = Self::default();
        for candidate in candidates {
            match classify(candidate.estado_gestion) {
                StatusBucket::Pending => chart.pending += 1,
                StatusBucket::InProcess => chart.in_process += 1,
                StatusBucket::Other => chart.other += 1,
            }
        }
        chart
    }

    pub fn total(&self) -> usize {
        self.pending + self.in_process + self.other
    }
}

/// Holds the previously drawn chart so a re-render replaces it instead of
/// accumulating stale drawings.
#[derive(Debug, Default)]
pub struct ChartRenderer {
    current: Option<StatusChart>,
}

impl ChartRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives and installs the distribution for `candidates`, dropping
    /// whatever chart was drawn before.
    pub fn render(&mut self, candidates: &[Candidate]) -> &StatusChart {
        self.current.insert(StatusChart::from_candidates(candidates))
    }

    pub fn current(&self) -> Option<&StatusChart> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::RecordId;

    fn candidate(id: i64, status: CandidateStatus) -> Candidate {
        Candidate {
            id: RecordId::new(id),
            nombre: None,
            apellido: None,
            telefono: None,
            correo: None,
            ciudad: None,
            estado_gestion: status,
        }
    }

    #[test]
    fn classification_is_exhaustive_and_counts_sum_to_input_length() {
        let candidates: Vec<Candidate> = CandidateStatus::ALL
            .iter()
            .enumerate()
            .map(|(i, status)| candidate(i as i64, *status))
            .collect();

        let chart = StatusChart::from_candidates(&candidates);
        assert_eq!(chart.total(), candidates.len());
        assert_eq!(chart.pending, 1); // nuevo
        assert_eq!(chart.other, 1); // rechazado
        assert_eq!(chart.in_process, 3); // contactado, entrevistado, contratado
    }

    #[test]
    fn missing_status_rows_classify_as_pending() {
        let row: Candidate = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(classify(row.estado_gestion), StatusBucket::Pending);
    }

    #[test]
    fn rerender_replaces_the_previous_chart() {
        let mut renderer = ChartRenderer::new();
        renderer.render(&[candidate(1, CandidateStatus::Nuevo)]);
        assert_eq!(renderer.current().unwrap().pending, 1);

        renderer.render(&[candidate(1, CandidateStatus::Rechazado)]);
        let chart = renderer.current().unwrap();
        assert_eq!(chart.pending, 0);
        assert_eq!(chart.other, 1);
        assert_eq!(chart.total(), 1);
    }
}
