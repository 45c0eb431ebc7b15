//! SQL schema definitions for the workshop database.
//!
//! Tables own their DDL here; `db::initialize_db` applies the whole batch
//! idempotently. Column lists are the insert/update surface consumed by
//! `SqliteStore`; `id` is always the SQLite rowid and never written
//! directly.

pub const TALLER_DB_NAME: &str = "taller.db";

pub const TALLER_DB_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS usuarios (
    id INTEGER PRIMARY KEY,
    nombre TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    telefono TEXT,
    direccion TEXT,
    tipo TEXT NOT NULL,
    estado TEXT NOT NULL DEFAULT 'activo',
    created_at TEXT,
    updated_at TEXT
);

CREATE TABLE IF NOT EXISTS vehiculos (
    id INTEGER PRIMARY KEY,
    cliente_id INTEGER NOT NULL REFERENCES usuarios(id),
    placa TEXT NOT NULL,
    marca TEXT,
    modelo TEXT,
    anio INTEGER,
    color TEXT,
    kilometraje INTEGER,
    estado TEXT NOT NULL DEFAULT 'activo',
    created_at TEXT,
    updated_at TEXT
);

CREATE TABLE IF NOT EXISTS servicios (
    id INTEGER PRIMARY KEY,
    nombre TEXT NOT NULL,
    descripcion TEXT,
    tipo TEXT,
    precio_base REAL,
    duracion_estimada INTEGER,
    estado TEXT NOT NULL DEFAULT 'activo',
    created_at TEXT,
    updated_at TEXT
);

CREATE TABLE IF NOT EXISTS citas (
    id INTEGER PRIMARY KEY,
    codigo TEXT,
    cliente_id INTEGER NOT NULL REFERENCES usuarios(id),
    vehiculo_id INTEGER NOT NULL REFERENCES vehiculos(id),
    fecha TEXT NOT NULL,
    hora TEXT NOT NULL,
    motivo TEXT,
    estado TEXT NOT NULL DEFAULT 'pendiente',
    created_at TEXT,
    updated_at TEXT
);

CREATE TABLE IF NOT EXISTS diagnosticos (
    id INTEGER PRIMARY KEY,
    codigo TEXT,
    cita_id INTEGER NOT NULL REFERENCES citas(id),
    mecanico_id INTEGER NOT NULL REFERENCES usuarios(id),
    fecha_diagnostico TEXT,
    descripcion_problema TEXT,
    diagnostico TEXT,
    recomendaciones TEXT,
    created_at TEXT,
    updated_at TEXT
);

CREATE TABLE IF NOT EXISTS ordenes_trabajo (
    id INTEGER PRIMARY KEY,
    codigo TEXT,
    diagnostico_id INTEGER NOT NULL REFERENCES diagnosticos(id),
    mecanico_id INTEGER NOT NULL REFERENCES usuarios(id),
    fecha_inicio TEXT,
    costo_mano_obra REAL,
    costo_repuestos REAL,
    estado TEXT NOT NULL DEFAULT 'pendiente',
    created_at TEXT,
    updated_at TEXT
);

CREATE TABLE IF NOT EXISTS pagos (
    id INTEGER PRIMARY KEY,
    codigo TEXT,
    orden_trabajo_id INTEGER NOT NULL REFERENCES ordenes_trabajo(id),
    monto_total REAL,
    monto_pagado REAL NOT NULL DEFAULT 0,
    tipo_pago TEXT,
    numero_cuotas INTEGER,
    cuotas_pagadas INTEGER NOT NULL DEFAULT 0,
    estado TEXT NOT NULL DEFAULT 'pendiente',
    created_at TEXT,
    updated_at TEXT
);
";

pub const USUARIOS_COLUMNS: &[&str] = &[
    "nombre",
    "email",
    "password_hash",
    "telefono",
    "direccion",
    "tipo",
    "estado",
    "created_at",
    "updated_at",
];

pub const VEHICULOS_COLUMNS: &[&str] = &[
    "cliente_id",
    "placa",
    "marca",
    "modelo",
    "anio",
    "color",
    "kilometraje",
    "estado",
    "created_at",
    "updated_at",
];

pub const SERVICIOS_COLUMNS: &[&str] = &[
    "nombre",
    "descripcion",
    "tipo",
    "precio_base",
    "duracion_estimada",
    "estado",
    "created_at",
    "updated_at",
];

pub const CITAS_COLUMNS: &[&str] = &[
    "codigo",
    "cliente_id",
    "vehiculo_id",
    "fecha",
    "hora",
    "motivo",
    "estado",
    "created_at",
    "updated_at",
];

pub const DIAGNOSTICOS_COLUMNS: &[&str] = &[
    "codigo",
    "cita_id",
    "mecanico_id",
    "fecha_diagnostico",
    "descripcion_problema",
    "diagnostico",
    "recomendaciones",
    "created_at",
    "updated_at",
];

pub const ORDENES_TRABAJO_COLUMNS: &[&str] = &[
    "codigo",
    "diagnostico_id",
    "mecanico_id",
    "fecha_inicio",
    "costo_mano_obra",
    "costo_repuestos",
    "estado",
    "created_at",
    "updated_at",
];

pub const PAGOS_COLUMNS: &[&str] = &[
    "codigo",
    "orden_trabajo_id",
    "monto_total",
    "monto_pagado",
    "tipo_pago",
    "numero_cuotas",
    "cuotas_pagadas",
    "estado",
    "created_at",
    "updated_at",
];
