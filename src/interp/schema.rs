//! Static entity schema registry.
//!
//! One immutable descriptor per entity: the ordered field list `agregar` and
//! `modificar` bind parameters to, each field's format validator resolved at
//! definition time, the backing table and its writable columns, the business
//! code prefix, the default state for new rows, and the report breakdown
//! buckets. Subtype names are not schema entries; they alias the user schema.
//!
//! Field order is a hard contract: positional binding means reordering a
//! field list silently corrupts every `agregar`/`modificar` for that entity.

use crate::core::schemas;
use crate::interp::validators;
use crate::lang::token::EntityKw;

pub type FieldValidator = fn(&str) -> bool;

pub struct FieldDef {
    pub name: &'static str,
    pub validator: Option<FieldValidator>,
}

const fn field(name: &'static str) -> FieldDef {
    FieldDef {
        name,
        validator: None,
    }
}

const fn checked(name: &'static str, validator: FieldValidator) -> FieldDef {
    FieldDef {
        name,
        validator: Some(validator),
    }
}

/// Report breakdown: one count query per `(value, report key)` bucket over
/// `column`.
pub struct ReportBreakdown {
    pub column: &'static str,
    pub buckets: &'static [(&'static str, &'static str)],
}

pub struct EntitySchema {
    pub entity: EntityKw,
    pub table: &'static str,
    pub columns: &'static [&'static str],
    pub fields: &'static [FieldDef],
    pub code_prefix: Option<&'static str>,
    pub default_state: Option<&'static str>,
    pub breakdown: Option<ReportBreakdown>,
}

impl EntitySchema {
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }
}

pub const USUARIO_SCHEMA: EntitySchema = EntitySchema {
    entity: EntityKw::Usuario,
    table: "usuarios",
    columns: schemas::USUARIOS_COLUMNS,
    fields: &[
        field("nombre"),
        checked("email", validators::validate_email),
        field("password"),
        checked("telefono", validators::validate_phone),
        field("direccion"),
        checked("tipo", validators::validate_user_type),
    ],
    code_prefix: None,
    default_state: Some("activo"),
    breakdown: Some(ReportBreakdown {
        column: "tipo",
        buckets: &[
            ("cliente", "total_clientes"),
            ("mecanico", "total_mecanicos"),
            ("secretaria", "total_secretarias"),
            ("propietario", "total_propietarios"),
        ],
    }),
};

pub const VEHICULO_SCHEMA: EntitySchema = EntitySchema {
    entity: EntityKw::Vehiculo,
    table: "vehiculos",
    columns: schemas::VEHICULOS_COLUMNS,
    fields: &[
        field("cliente_id"),
        checked("placa", validators::validate_plate),
        field("marca"),
        field("modelo"),
        field("anio"),
        field("color"),
        field("kilometraje"),
    ],
    code_prefix: None,
    default_state: Some("activo"),
    breakdown: None,
};

pub const SERVICIO_SCHEMA: EntitySchema = EntitySchema {
    entity: EntityKw::Servicio,
    table: "servicios",
    columns: schemas::SERVICIOS_COLUMNS,
    // `tipo` here is a service category (diagnostico/mantenimiento/
    // reparacion), not a user type; it carries no format validator.
    fields: &[
        field("nombre"),
        field("descripcion"),
        field("tipo"),
        field("precio_base"),
        field("duracion_estimada"),
    ],
    code_prefix: None,
    default_state: Some("activo"),
    breakdown: None,
};

pub const CITA_SCHEMA: EntitySchema = EntitySchema {
    entity: EntityKw::Cita,
    table: "citas",
    columns: schemas::CITAS_COLUMNS,
    fields: &[
        field("cliente_id"),
        field("vehiculo_id"),
        checked("fecha", validators::validate_date),
        checked("hora", validators::validate_time),
        field("motivo"),
    ],
    code_prefix: Some("CIT"),
    default_state: Some("pendiente"),
    breakdown: Some(ReportBreakdown {
        column: "estado",
        buckets: &[
            ("pendiente", "estado_pendiente"),
            ("confirmada", "estado_confirmada"),
            ("completada", "estado_completada"),
            ("cancelada", "estado_cancelada"),
        ],
    }),
};

pub const DIAGNOSTICO_SCHEMA: EntitySchema = EntitySchema {
    entity: EntityKw::Diagnostico,
    table: "diagnosticos",
    columns: schemas::DIAGNOSTICOS_COLUMNS,
    fields: &[
        field("cita_id"),
        field("mecanico_id"),
        checked("fecha_diagnostico", validators::validate_date),
        field("descripcion_problema"),
        field("diagnostico"),
        field("recomendaciones"),
    ],
    code_prefix: Some("DIAG"),
    default_state: None,
    breakdown: None,
};

pub const ORDEN_SCHEMA: EntitySchema = EntitySchema {
    entity: EntityKw::Orden,
    table: "ordenes_trabajo",
    columns: schemas::ORDENES_TRABAJO_COLUMNS,
    fields: &[
        field("diagnostico_id"),
        field("mecanico_id"),
        checked("fecha_inicio", validators::validate_date),
        field("costo_mano_obra"),
        field("costo_repuestos"),
    ],
    code_prefix: Some("ORD"),
    default_state: Some("pendiente"),
    breakdown: None,
};

pub const PAGO_SCHEMA: EntitySchema = EntitySchema {
    entity: EntityKw::Pago,
    table: "pagos",
    columns: schemas::PAGOS_COLUMNS,
    fields: &[
        field("orden_trabajo_id"),
        field("monto_total"),
        field("tipo_pago"),
        field("numero_cuotas"),
    ],
    code_prefix: Some("PAG"),
    default_state: Some("pendiente"),
    breakdown: Some(ReportBreakdown {
        column: "estado",
        buckets: &[
            ("pendiente", "estado_pendiente"),
            ("pagado_parcial", "estado_pagado_parcial"),
            ("pagado_total", "estado_pagado_total"),
        ],
    }),
};

/// Resolves the static descriptor for an entity. Total over `EntityKw`.
pub fn schema_for(entity: EntityKw) -> &'static EntitySchema {
    match entity {
        EntityKw::Usuario => &USUARIO_SCHEMA,
        EntityKw::Vehiculo => &VEHICULO_SCHEMA,
        EntityKw::Servicio => &SERVICIO_SCHEMA,
        EntityKw::Cita => &CITA_SCHEMA,
        EntityKw::Diagnostico => &DIAGNOSTICO_SCHEMA,
        EntityKw::Orden => &ORDEN_SCHEMA,
        EntityKw::Pago => &PAGO_SCHEMA,
    }
}
