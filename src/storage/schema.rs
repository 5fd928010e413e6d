//! Database schema definitions

/// SQL to create the frames table
pub const CREATE_FRAMES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS frames (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    brand TEXT,
    model_code TEXT NOT NULL CHECK (length(trim(model_code)) > 0),
    material TEXT,
    lens_width INTEGER CHECK (lens_width IS NULL OR lens_width >= 0),
    bridge_size INTEGER CHECK (bridge_size IS NULL OR bridge_size >= 0),
    temple_length INTEGER CHECK (temple_length IS NULL OR temple_length >= 0),
    color TEXT,
    shape TEXT,
    gender TEXT,
    price REAL CHECK (price IS NULL OR price >= 0),
    stock INTEGER NOT NULL DEFAULT 0 CHECK (stock >= 0),
    notes TEXT,
    created_at TEXT NOT NULL
)
"#;

/// SQL to drop the frames table
pub const DROP_FRAMES_TABLE: &str = "DROP TABLE IF EXISTS frames";

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_frames_brand ON frames(brand)",
    "CREATE INDEX IF NOT EXISTS idx_frames_model_code ON frames(model_code)",
    "CREATE INDEX IF NOT EXISTS idx_frames_material ON frames(material)",
    "CREATE INDEX IF NOT EXISTS idx_frames_created_at ON frames(created_at)",
];

/// Column list shared by every SELECT, in `row_to_frame` order
pub const FRAME_COLUMNS: &str = "id, brand, model_code, material, lens_width, bridge_size, \
     temple_length, color, shape, gender, price, stock, notes, created_at";

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_FRAMES_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
