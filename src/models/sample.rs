//! Built-in sample dataset.

use super::{CaseRecord, CaseStatus};
use chrono::NaiveDate;

const PLACEHOLDER_PHOTO: &str = "/placeholder.svg";

/// Returns the demo case collection used when no records file is configured.
#[must_use]
pub fn sample_cases() -> Vec<CaseRecord> {
    [
        (
            "1",
            "Maria Silva",
            28,
            (2024, 5, 20),
            "São Paulo, SP",
            "Última vez vista no centro da cidade usando blusa azul",
            CaseStatus::Recent,
        ),
        (
            "2",
            "João Santos",
            45,
            (2024, 5, 15),
            "Rio de Janeiro, RJ",
            "Saiu para trabalhar e não retornou para casa",
            CaseStatus::Urgent,
        ),
        (
            "3",
            "Ana Costa",
            17,
            (2024, 5, 18),
            "Belo Horizonte, MG",
            "Desapareceu após sair da escola no período da tarde",
            CaseStatus::Recent,
        ),
        (
            "4",
            "Carlos Oliveira",
            32,
            (2024, 5, 10),
            "Porto Alegre, RS",
            "Não retornou de uma caminhada no parque",
            CaseStatus::Urgent,
        ),
    ]
    .into_iter()
    .filter_map(|(id, name, age, (y, m, d), location, description, status)| {
        let last_seen = NaiveDate::from_ymd_opt(y, m, d)?;
        Some(
            CaseRecord::new(id, name, age, last_seen)
                .with_location(location)
                .with_description(description)
                .with_photo(PLACEHOLDER_PHOTO)
                .with_status(status),
        )
    })
    .collect()
}
