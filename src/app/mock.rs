//! Hardcoded data behind every screen. Nothing here is loaded or persisted.

use crate::kernel::select::{Glyph, SelectOption};

pub fn service_types() -> Vec<SelectOption> {
    [
        ("pavimentacao", "Pavimentação", "Buracos e recapeamento", Glyph::Road),
        ("iluminacao", "Iluminação pública", "Troca de lâmpadas e postes", Glyph::Light),
        ("poda", "Poda de árvores", "Galhos sobre a via ou a rede", Glyph::Tree),
        ("drenagem", "Drenagem", "Bueiros entupidos e alagamentos", Glyph::Drain),
        ("calcadas", "Calçadas", "Reparo de passeios e rampas", Glyph::Sidewalk),
        ("sinalizacao", "Sinalização", "Placas e faixas de pedestre", Glyph::Sign),
        ("entulho", "Remoção de entulho", "Descarte irregular", Glyph::Debris),
        ("pracas", "Praças e parques", "Manutenção de áreas verdes", Glyph::Square),
    ]
    .into_iter()
    .map(|(value, label, subtext, glyph)| {
        SelectOption::new(value, label).subtext(subtext).icon(glyph)
    })
    .collect()
}

const BAIRROS: &[(&str, &str)] = &[
    ("Centro", "Região Central"),
    ("Bela Vista", "Região Central"),
    ("Consolação", "Região Central"),
    ("Liberdade", "Região Central"),
    ("Santa Cecília", "Região Central"),
    ("Jardim América", "Zona Sul"),
    ("Vila Mariana", "Zona Sul"),
    ("Saúde", "Zona Sul"),
    ("Ipiranga", "Zona Sul"),
    ("Campo Belo", "Zona Sul"),
    ("Santo Amaro", "Zona Sul"),
    ("Santana", "Zona Norte"),
    ("Tucuruvi", "Zona Norte"),
    ("Vila Guilherme", "Zona Norte"),
    ("Casa Verde", "Zona Norte"),
    ("Freguesia do Ó", "Zona Norte"),
    ("Tatuapé", "Zona Leste"),
    ("Mooca", "Zona Leste"),
    ("Penha", "Zona Leste"),
    ("Itaquera", "Zona Leste"),
    ("São Mateus", "Zona Leste"),
    ("Pinheiros", "Zona Oeste"),
    ("Lapa", "Zona Oeste"),
    ("Butantã", "Zona Oeste"),
    ("Perdizes", "Zona Oeste"),
    ("Vila Leopoldina", "Zona Oeste"),
];

/// Stable value for a neighbourhood name: lowercase ASCII words joined by `-`.
pub fn bairro_value(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'á' | 'â' | 'ã' | 'à' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' | 'Ó' => 'o',
            'ú' => 'u',
            'ç' => 'c',
            ' ' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

pub fn bairros() -> Vec<SelectOption> {
    BAIRROS
        .iter()
        .map(|(name, zone)| SelectOption::new(bairro_value(name), *name).subtext(*zone))
        .collect()
}

pub fn prioridades() -> Vec<SelectOption> {
    vec![
        SelectOption::new("baixa", "Baixa").subtext("Atendimento em até 30 dias"),
        SelectOption::new("normal", "Normal").subtext("Atendimento em até 10 dias"),
        SelectOption::new("alta", "Alta")
            .subtext("Atendimento em até 72 horas")
            .icon(Glyph::Clock),
        SelectOption::new("urgente", "Urgente")
            .subtext("Risco à segurança, 24 horas")
            .icon(Glyph::Alert),
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderStatus {
    Waiting,
    InProgress,
    Paused,
    Done,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Waiting,
        OrderStatus::InProgress,
        OrderStatus::Paused,
        OrderStatus::Done,
    ];

    pub fn value(self) -> &'static str {
        match self {
            OrderStatus::Waiting => "aguardando",
            OrderStatus::InProgress => "em-andamento",
            OrderStatus::Paused => "pausada",
            OrderStatus::Done => "concluida",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Waiting => "Aguardando",
            OrderStatus::InProgress => "Em andamento",
            OrderStatus::Paused => "Pausada",
            OrderStatus::Done => "Concluída",
        }
    }

    pub fn glyph(self) -> Glyph {
        match self {
            OrderStatus::Waiting => Glyph::Clock,
            OrderStatus::InProgress => Glyph::Pin,
            OrderStatus::Paused => Glyph::Pause,
            OrderStatus::Done => Glyph::Check,
        }
    }
}

/// Value of the status filter option that shows every order.
pub const ALL_STATUSES: &str = "todos";

pub fn status_filter_options() -> Vec<SelectOption> {
    std::iter::once(SelectOption::new(ALL_STATUSES, "Todos os status"))
        .chain(
            OrderStatus::ALL
                .into_iter()
                .map(|s| SelectOption::new(s.value(), s.label()).icon(s.glyph())),
        )
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkOrder {
    pub code: &'static str,
    pub title: &'static str,
    pub bairro: &'static str,
    pub team: &'static str,
    pub status: OrderStatus,
    /// Percent complete, 0..=100.
    pub progress: u8,
}

pub fn work_orders() -> Vec<WorkOrder> {
    use OrderStatus::*;
    let rows: [(&str, &str, &str, &str, OrderStatus, u8); 9] = [
        ("OS-1042", "Recapeamento da Rua Augusta", "Consolação", "Equipe Asfalto 2", InProgress, 60),
        ("OS-1043", "Troca de luminárias LED", "Santana", "Equipe Elétrica 1", InProgress, 35),
        ("OS-1047", "Desobstrução de bueiros", "Mooca", "Equipe Drenagem", Waiting, 0),
        ("OS-1051", "Poda preventiva na Av. Paulista", "Bela Vista", "Equipe Verde 3", Paused, 20),
        ("OS-1052", "Reforma de calçada acessível", "Pinheiros", "Equipe Obras 4", InProgress, 80),
        ("OS-1055", "Pintura de faixas escolares", "Vila Mariana", "Equipe Sinalização", Done, 100),
        ("OS-1058", "Remoção de entulho em terreno", "Itaquera", "Equipe Limpeza 1", Waiting, 0),
        ("OS-1060", "Revitalização da Praça Cívica", "Centro", "Equipe Verde 1", InProgress, 45),
        ("OS-1061", "Tapa-buraco emergencial", "Tatuapé", "Equipe Asfalto 1", Done, 100),
    ];
    rows.into_iter()
        .map(|(code, title, bairro, team, status, progress)| WorkOrder {
            code,
            title,
            bairro,
            team,
            status,
            progress,
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Metric {
    pub label: &'static str,
    pub value: &'static str,
    pub detail: &'static str,
}

pub fn metrics() -> Vec<Metric> {
    vec![
        Metric {
            label: "Solicitações abertas",
            value: "128",
            detail: "+12 esta semana",
        },
        Metric {
            label: "Em execução",
            value: "37",
            detail: "9 equipes em campo",
        },
        Metric {
            label: "Concluídas no mês",
            value: "214",
            detail: "92% no prazo",
        },
        Metric {
            label: "Tempo médio",
            value: "4,2 dias",
            detail: "-0,8 dia vs. mês anterior",
        },
    ]
}

pub fn requests_by_bairro() -> Vec<(&'static str, u32)> {
    vec![
        ("Centro", 31),
        ("Mooca", 22),
        ("Santana", 18),
        ("Pinheiros", 15),
        ("Itaquera", 14),
        ("Vila Mariana", 11),
        ("Butantã", 9),
        ("Penha", 8),
    ]
}

/// File names offered, in order, when the user attaches a photo to a request.
pub const ATTACHMENT_NAMES: &[&str] = &[
    "foto_local_01.jpg",
    "foto_local_02.jpg",
    "buraco_detalhe.png",
    "vista_rua.jpg",
    "poste_apagado.jpg",
    "croqui.png",
];

#[cfg(test)]
#[path = "../../tests/unit/app/mock.rs"]
mod tests;
