use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::types::RecordId;

/// One row of the remote `llamadas` table, without relations.
///
/// Both foreign-key column spellings seen in the wild are carried
/// (`candidato_id`/`id_candidato`, `evento_id`/`id_evento`); relation
/// resolution consults them in that order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Call {
    pub id: RecordId,
    #[serde(default)]
    pub fecha_hora_llamada: Option<String>,
    #[serde(default)]
    pub resultado: Option<String>,
    #[serde(default)]
    pub resumen: Option<String>,
    #[serde(default)]
    pub candidato_id: Option<RecordId>,
    #[serde(default)]
    pub id_candidato: Option<RecordId>,
    #[serde(default)]
    pub evento_id: Option<RecordId>,
    #[serde(default)]
    pub id_evento: Option<RecordId>,
    /// Conversation handle of the automated call, when a recording exists.
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// Candidate fields embedded by the joined calls query.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RelatedCandidate {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub apellido: Option<String>,
}

impl RelatedCandidate {
    pub fn full_name(&self) -> String {
        let mut name = String::new();
        if let Some(nombre) = self.nombre.as_deref() {
            name.push_str(nombre.trim());
        }
        if let Some(apellido) = self.apellido.as_deref() {
            if !name.is_empty() {
                name.push(' ');
            }
            name.push_str(apellido.trim());
        }
        name
    }
}

/// Event fields embedded by the joined calls query.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RelatedEvent {
    #[serde(default)]
    pub tipo_reunion: Option<String>,
}

/// A call with its resolved relations, as rendered by the calls view.
///
/// Deserializes directly from the embedded-join response shape
/// (`*, candidatos(...), eventos(...)`); the fallback path assembles the
/// same struct from locally built id maps.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CallWithRelations {
    #[serde(flatten)]
    pub call: Call,
    #[serde(default)]
    pub candidatos: Option<RelatedCandidate>,
    #[serde(default)]
    pub eventos: Option<RelatedEvent>,
}

impl CallWithRelations {
    /// Resolves relations against locally fetched id maps, trying both
    /// foreign-key column spellings before declaring "no match".
    pub fn resolve(
        call: Call,
        candidates: &HashMap<RecordId, RelatedCandidate>,
        events: &HashMap<RecordId, RelatedEvent>,
    ) -> Self {
        let candidatos = lookup(candidates, call.candidato_id, call.id_candidato);
        let eventos = lookup(events, call.evento_id, call.id_evento);
        Self {
            call,
            candidatos,
            eventos,
        }
    }
}

fn lookup<T: Clone>(
    map: &HashMap<RecordId, T>,
    primary: Option<RecordId>,
    variant: Option<RecordId>,
) -> Option<T> {
    primary
        .and_then(|id| map.get(&id))
        .or_else(|| variant.and_then(|id| map.get(&id)))
        .cloned()
}

/// Insert payload for a call log entry; writes use the canonical
/// foreign-key column names.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewCall {
    pub fecha_hora_llamada: String,
    pub resultado: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resumen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidato_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evento_id: Option<RecordId>,
}

impl NewCall {
    #[must_use]
    pub fn new(
        fecha_hora_llamada: String,
        resultado: String,
        resumen: Option<String>,
        candidato_id: Option<RecordId>,
        evento_id: Option<RecordId>,
    ) -> Self {
        Self {
            fecha_hora_llamada: fecha_hora_llamada.trim().to_string(),
            resultado: resultado.trim().to_string(),
            resumen: resumen
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            candidato_id,
            evento_id,
        }
    }
}

/// Patch payload for a call log entry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UpdateCall {
    pub fecha_hora_llamada: String,
    pub resultado: String,
    pub resumen: Option<String>,
    pub candidato_id: Option<RecordId>,
    pub evento_id: Option<RecordId>,
}

impl UpdateCall {
    #[must_use]
    pub fn new(
        fecha_hora_llamada: String,
        resultado: String,
        resumen: Option<String>,
        candidato_id: Option<RecordId>,
        evento_id: Option<RecordId>,
    ) -> Self {
        Self {
            fecha_hora_llamada: fecha_hora_llamada.trim().to_string(),
            resultado: resultado.trim().to_string(),
            resumen: resumen
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            candidato_id,
            evento_id,
        }
    }
}
