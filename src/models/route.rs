//! Modelo de Rota
//!
//! Agregado de ruta generada: estado, turno, referencias opcionales a
//! conductor/vehículo/destino, atribuciones ordenadas y estimaciones.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Estado de la ruta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusRota {
    Rascunho,
    Agendada,
    EmAndamento,
    Concluida,
    Cancelada,
}

impl StatusRota {
    pub const ALL: [StatusRota; 5] = [
        StatusRota::Rascunho,
        StatusRota::Agendada,
        StatusRota::EmAndamento,
        StatusRota::Concluida,
        StatusRota::Cancelada,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusRota::Rascunho => "rascunho",
            StatusRota::Agendada => "agendada",
            StatusRota::EmAndamento => "em_andamento",
            StatusRota::Concluida => "concluida",
            StatusRota::Cancelada => "cancelada",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusRota::Rascunho => "Rascunho",
            StatusRota::Agendada => "Agendada",
            StatusRota::EmAndamento => "Em andamento",
            StatusRota::Concluida => "Concluída",
            StatusRota::Cancelada => "Cancelada",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s.trim())
    }
}

/// Turno de trabajo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnoTrabalho {
    Manha,
    Tarde,
    Noite,
}

impl TurnoTrabalho {
    pub const ALL: [TurnoTrabalho; 3] = [TurnoTrabalho::Manha, TurnoTrabalho::Tarde, TurnoTrabalho::Noite];

    pub fn as_str(&self) -> &'static str {
        match self {
            TurnoTrabalho::Manha => "manha",
            TurnoTrabalho::Tarde => "tarde",
            TurnoTrabalho::Noite => "noite",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TurnoTrabalho::Manha => "Manhã",
            TurnoTrabalho::Tarde => "Tarde",
            TurnoTrabalho::Noite => "Noite",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|turno| turno.as_str() == s.trim())
    }
}

impl Default for TurnoTrabalho {
    fn default() -> Self {
        TurnoTrabalho::Manha
    }
}

/// Modo de generación
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModoGeracao {
    Automatico,
    Manual,
}

/// Papel de un funcionario dentro de la ruta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PapelAtribuicao {
    Motorista,
    Passageiro,
    Reserva,
}

impl PapelAtribuicao {
    pub fn as_str(&self) -> &'static str {
        match self {
            PapelAtribuicao::Motorista => "motorista",
            PapelAtribuicao::Passageiro => "passageiro",
            PapelAtribuicao::Reserva => "reserva",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "motorista" => Some(PapelAtribuicao::Motorista),
            "passageiro" => Some(PapelAtribuicao::Passageiro),
            "reserva" => Some(PapelAtribuicao::Reserva),
            _ => None,
        }
    }
}

/// Sugerencia de vehículo extra cuando falta capacidad
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SugestaoVeiculoExtra {
    pub tipo: String,
    pub quantidade: i32,
    pub capacidade_por_veiculo: i32,
    pub passageiros_atendidos: i32,
}

/// Destino embebido en la ruta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinoResumo {
    pub id: i64,
    pub empresa_id: i64,
    pub nome: String,
    pub logradouro: String,
    pub numero: String,
    pub complemento: Option<String>,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl DestinoResumo {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Atribución de un funcionario a una ruta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtribuicaoRota {
    pub id: i64,
    pub rota_id: i64,
    pub funcionario_id: i64,
    pub papel: PapelAtribuicao,
    pub ordem_embarque: Option<i32>,
    pub hora_embarque: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl AtribuicaoRota {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Ruta generada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rota {
    pub id: i64,
    pub empresa_id: i64,
    pub grupo_rota_id: i64,
    pub data_agendada: String,
    pub turno: TurnoTrabalho,
    pub status: StatusRota,
    pub modo_geracao: ModoGeracao,
    pub motorista_id: Option<i64>,
    pub veiculo_id: Option<i64>,
    pub destino_id: Option<i64>,
    #[serde(default)]
    pub destino: Option<DestinoResumo>,
    #[serde(default)]
    pub atribuicoes: Vec<AtribuicaoRota>,
    #[serde(default)]
    pub observacoes: Option<String>,
    #[serde(default)]
    pub sugestoes_veiculos: Vec<SugestaoVeiculoExtra>,
    #[serde(default)]
    pub distancia_total_km: Option<f64>,
    #[serde(default)]
    pub custo_operacional_total: Option<f64>,
}

/// Alias usado por la pantalla de generación
pub type RotaGerada = Rota;

impl Rota {
    /// Atribuciones ordenadas por orden de embarque; las que no tienen orden
    /// van al final conservando su posición relativa.
    pub fn sorted_assignments(&self) -> Vec<AtribuicaoRota> {
        let mut sorted = self.atribuicoes.clone();
        sorted.sort_by(|a, b| compare_boarding_order(a.ordem_embarque, b.ordem_embarque));
        sorted
    }

    /// Comparte fecha y turno con otra ruta
    pub fn shares_schedule_with(&self, other: &Rota) -> bool {
        self.data_agendada == other.data_agendada && self.turno == other.turno
    }

    pub fn has_employee(&self, funcionario_id: i64) -> bool {
        self.atribuicoes.iter().any(|a| a.funcionario_id == funcionario_id)
    }

    pub fn passenger_count(&self) -> usize {
        self.atribuicoes
            .iter()
            .filter(|a| a.papel == PapelAtribuicao::Passageiro)
            .count()
    }
}

pub fn compare_boarding_order(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.cmp(&b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atribuicao(funcionario_id: i64, ordem: Option<i32>) -> AtribuicaoRota {
        AtribuicaoRota {
            id: funcionario_id * 10,
            rota_id: 1,
            funcionario_id,
            papel: PapelAtribuicao::Passageiro,
            ordem_embarque: ordem,
            hora_embarque: None,
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&StatusRota::EmAndamento).unwrap(), "\"em_andamento\"");
        assert_eq!(StatusRota::from_str("concluida"), Some(StatusRota::Concluida));
        assert_eq!(StatusRota::from_str("done"), None);
    }

    #[test]
    fn test_sorted_assignments_puts_missing_order_last() {
        let rota: Rota = serde_json::from_value(serde_json::json!({
            "id": 1, "empresa_id": 1, "grupo_rota_id": 1,
            "data_agendada": "2025-03-10", "turno": "manha", "status": "rascunho",
            "modo_geracao": "automatico", "motorista_id": null, "veiculo_id": null,
            "destino_id": null
        }))
        .unwrap();
        let rota = Rota {
            atribuicoes: vec![
                atribuicao(1, None),
                atribuicao(2, Some(2)),
                atribuicao(3, None),
                atribuicao(4, Some(0)),
            ],
            ..rota
        };

        let ids: Vec<i64> = rota.sorted_assignments().iter().map(|a| a.funcionario_id).collect();
        assert_eq!(ids, vec![4, 2, 1, 3]);
    }
}
