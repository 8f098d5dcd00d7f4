//! Record kinds and their per-table metadata descriptors.
//!
//! Every record kind shares `{id, numeroCaso, fecha, ..., observaciones?}`.
//! The descriptors here are the single source of truth for key renames,
//! required/editable/searchable fields and human-readable labels.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared field names (UI shape)
// ---------------------------------------------------------------------------

pub const FIELD_ID: &str = "id";
pub const FIELD_CASE_NUMBER: &str = "numeroCaso";
pub const FIELD_DATE: &str = "fecha";
pub const FIELD_PROSECUTION: &str = "procuraduria";
pub const FIELD_AGE: &str = "edad";
pub const FIELD_YEAR: &str = "anio";
pub const FIELD_QUANTITY: &str = "cantidad";
pub const FIELD_ESTIMATED_VALUE: &str = "valorEstimado";
pub const FIELD_NOTIFIED_COUNT: &str = "numeroNotificados";

/// DB column holding the case number in every table.
pub const COLUMN_CASE_NUMBER: &str = "numerocaso";

/// DB columns constrained server-side to a fixed value set.
///
/// These are never persisted as empty strings; an empty value means the key
/// is omitted from the write entirely.
pub const ENUM_FIELDS: &[&str] = &["provinciamunicipio", "tipoactividad", "areatematica", "region"];

/// Whether a DB column is an enum field.
pub fn is_enum_field(db_key: &str) -> bool {
    ENUM_FIELDS.contains(&db_key)
}

// ---------------------------------------------------------------------------
// Table type
// ---------------------------------------------------------------------------

/// The four record kinds managed by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableType {
    /// Informational notes: case metadata and outcome.
    Notas,
    /// Detained persons linked to a case.
    Detenidos,
    /// Vehicles linked to a case.
    Vehiculos,
    /// Seized items linked to a case.
    Incautaciones,
}

impl TableType {
    pub const ALL: [TableType; 4] = [
        TableType::Notas,
        TableType::Detenidos,
        TableType::Vehiculos,
        TableType::Incautaciones,
    ];

    /// Parse a table from its URL slug or its DB table name.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.slug() == raw || t.table_name() == raw)
    }

    /// URL-facing identifier.
    pub fn slug(self) -> &'static str {
        match self {
            TableType::Notas => "notas",
            TableType::Detenidos => "detenidos",
            TableType::Vehiculos => "vehiculos",
            TableType::Incautaciones => "incautaciones",
        }
    }

    pub fn table_name(self) -> &'static str {
        self.meta().table_name
    }

    pub fn display_name(self) -> &'static str {
        self.meta().display_name
    }

    pub fn meta(self) -> &'static TableMeta {
        match self {
            TableType::Notas => &NOTAS,
            TableType::Detenidos => &DETENIDOS,
            TableType::Vehiculos => &VEHICULOS,
            TableType::Incautaciones => &INCAUTACIONES,
        }
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

// ---------------------------------------------------------------------------
// Metadata descriptor
// ---------------------------------------------------------------------------

/// Static description of one table.
#[derive(Debug, Serialize)]
pub struct TableMeta {
    pub table_name: &'static str,
    pub display_name: &'static str,
    /// UI key → DB key pairs for keys whose names differ between shapes.
    /// Keys absent here are identical in both shapes (already lowercase).
    #[serde(skip)]
    pub key_map: &'static [(&'static str, &'static str)],
    pub required_fields: &'static [&'static str],
    pub editable_fields: &'static [&'static str],
    pub search_fields: &'static [&'static str],
    pub date_fields: &'static [&'static str],
    #[serde(skip)]
    pub labels: &'static [(&'static str, &'static str)],
}

impl TableMeta {
    /// Human-readable label for a UI field, falling back to the key itself.
    pub fn label<'a>(&'a self, field: &'a str) -> &'a str {
        self.labels
            .iter()
            .chain(COMMON_LABELS)
            .find(|(key, _)| *key == field)
            .map(|(_, label)| *label)
            .unwrap_or(field)
    }

    pub fn is_editable(&self, field: &str) -> bool {
        self.editable_fields.contains(&field)
    }
}

const COMMON_LABELS: &[(&str, &str)] = &[
    ("id", "Identificador"),
    ("numeroCaso", "Número de caso"),
    ("fecha", "Fecha"),
    ("provinciamunicipio", "Provincia/Municipio"),
    ("observaciones", "Observaciones"),
];

static NOTAS: TableMeta = TableMeta {
    table_name: "notas_informativas",
    display_name: "Notas informativas",
    key_map: &[
        ("numeroCaso", "numerocaso"),
        ("tipoActividad", "tipoactividad"),
        ("areaTematica", "areatematica"),
        ("numeroNotificados", "numero_notificados"),
    ],
    required_fields: &["numeroCaso", "fecha", "tipoActividad"],
    editable_fields: &[
        "numeroCaso",
        "fecha",
        "provinciamunicipio",
        "localidad",
        "region",
        "tipoActividad",
        "areaTematica",
        "notificados",
        "numeroNotificados",
        "procuraduria",
        "resultado",
        "observaciones",
    ],
    search_fields: &[
        "numeroCaso",
        "fecha",
        "provinciamunicipio",
        "localidad",
        "region",
        "tipoActividad",
        "areaTematica",
        "notificados",
        "procuraduria",
        "resultado",
        "observaciones",
    ],
    date_fields: &["fecha"],
    labels: &[
        ("localidad", "Localidad"),
        ("region", "Región"),
        ("tipoActividad", "Tipo de actividad"),
        ("areaTematica", "Área temática"),
        ("notificados", "Notificados"),
        ("numeroNotificados", "Número de notificados"),
        ("procuraduria", "Procuraduría"),
        ("resultado", "Resultado"),
    ],
};

static DETENIDOS: TableMeta = TableMeta {
    table_name: "detenidos",
    display_name: "Detenidos",
    key_map: &[
        ("numeroCaso", "numerocaso"),
        ("motivoDetencion", "motivo_detencion"),
        ("estadoProceso", "estado_proceso"),
    ],
    required_fields: &["numeroCaso", "fecha", "nombre", "motivoDetencion"],
    editable_fields: &[
        "numeroCaso",
        "fecha",
        "nombre",
        "edad",
        "nacionalidad",
        "motivoDetencion",
        "estadoProceso",
        "provinciamunicipio",
        "observaciones",
    ],
    search_fields: &[
        "numeroCaso",
        "fecha",
        "nombre",
        "nacionalidad",
        "motivoDetencion",
        "estadoProceso",
        "provinciamunicipio",
        "observaciones",
    ],
    date_fields: &["fecha"],
    labels: &[
        ("nombre", "Nombre"),
        ("edad", "Edad"),
        ("nacionalidad", "Nacionalidad"),
        ("motivoDetencion", "Motivo de detención"),
        ("estadoProceso", "Estado del proceso"),
    ],
};

static VEHICULOS: TableMeta = TableMeta {
    table_name: "vehiculos",
    display_name: "Vehículos",
    key_map: &[
        ("numeroCaso", "numerocaso"),
        ("tipoVehiculo", "tipo_vehiculo"),
    ],
    required_fields: &["numeroCaso", "fecha", "tipoVehiculo", "marca"],
    editable_fields: &[
        "numeroCaso",
        "fecha",
        "tipoVehiculo",
        "marca",
        "modelo",
        "color",
        "placa",
        "anio",
        "detalle",
        "provinciamunicipio",
        "observaciones",
    ],
    search_fields: &[
        "numeroCaso",
        "fecha",
        "tipoVehiculo",
        "marca",
        "modelo",
        "color",
        "placa",
        "detalle",
        "provinciamunicipio",
        "observaciones",
    ],
    date_fields: &["fecha"],
    labels: &[
        ("tipoVehiculo", "Tipo de vehículo"),
        ("marca", "Marca"),
        ("modelo", "Modelo"),
        ("color", "Color"),
        ("placa", "Placa"),
        ("anio", "Año"),
        ("detalle", "Detalle"),
    ],
};

static INCAUTACIONES: TableMeta = TableMeta {
    table_name: "incautaciones",
    display_name: "Incautaciones",
    key_map: &[
        ("numeroCaso", "numerocaso"),
        ("tipoIncautacion", "tipo_incautacion"),
        ("valorEstimado", "valor_estimado"),
    ],
    required_fields: &["numeroCaso", "fecha", "tipoIncautacion", "descripcion", "cantidad"],
    editable_fields: &[
        "numeroCaso",
        "fecha",
        "tipoIncautacion",
        "descripcion",
        "cantidad",
        "unidad",
        "valorEstimado",
        "custodio",
        "provinciamunicipio",
        "observaciones",
    ],
    search_fields: &[
        "numeroCaso",
        "fecha",
        "tipoIncautacion",
        "descripcion",
        "unidad",
        "custodio",
        "provinciamunicipio",
        "observaciones",
    ],
    date_fields: &["fecha"],
    labels: &[
        ("tipoIncautacion", "Tipo de incautación"),
        ("descripcion", "Descripción"),
        ("cantidad", "Cantidad"),
        ("unidad", "Unidad"),
        ("valorEstimado", "Valor estimado"),
        ("custodio", "Custodio"),
    ],
};
