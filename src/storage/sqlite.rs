//! SQLite storage implementation

use std::path::{Path, PathBuf};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, OptionalExtension, Params, params, params_from_iter};
use rusqlite::types::Value;
use crate::Result;
use crate::frame::{Frame, FrameId, NewFrame};
use crate::query::FrameFilter;
use super::schema;

/// SQLite-backed storage for frame records.
///
/// Each front end opens its own store; the connection is released when the
/// store is dropped.
pub struct FrameStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl FrameStore {
    /// Open a database file (creates the file, its directory and the table if missing)
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        register_functions(&conn)?;
        tracing::debug!("Opened frame database at {}", path.display());
        let store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        store.initialize(false)?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        register_functions(&conn)?;
        let store = Self { conn, path: None };
        store.initialize(false)?;
        Ok(store)
    }

    /// Backing file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Create the table if absent. With `drop_existing`, the table is dropped
    /// and recreated first, discarding every record.
    pub fn initialize(&self, drop_existing: bool) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        if drop_existing {
            tracing::info!("Dropping frames table");
            tx.execute(schema::DROP_FRAMES_TABLE, [])?;
        }
        for stmt in schema::all_schema_statements() {
            tx.execute(stmt, [])?;
        }
        tx.commit()?;
        Ok(())
    }

    // ========== Writes ==========

    /// Persist a new frame and return its freshly assigned id
    pub fn insert(&self, frame: &NewFrame) -> Result<FrameId> {
        self.insert_at(frame, Utc::now())
    }

    fn insert_at(&self, frame: &NewFrame, created_at: DateTime<Utc>) -> Result<FrameId> {
        frame.validate()?;
        self.conn.execute(
            r#"
            INSERT INTO frames (brand, model_code, material, lens_width, bridge_size, temple_length,
                                color, shape, gender, price, stock, notes, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
            params![
                frame.brand,
                frame.model_code,
                frame.material,
                frame.lens_width,
                frame.bridge_size,
                frame.temple_length,
                frame.color,
                frame.shape,
                frame.gender,
                frame.price,
                frame.stock,
                frame.notes,
                format_timestamp(&created_at),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, model_code = %frame.model_code, "Inserted frame");
        Ok(id)
    }

    // ========== Reads ==========

    /// Get a frame by id
    pub fn get(&self, id: FrameId) -> Result<Option<Frame>> {
        let sql = format!("SELECT {} FROM frames WHERE id = ?1", schema::FRAME_COLUMNS);
        self.conn
            .query_row(&sql, [id], row_to_frame)
            .optional()
            .map_err(Into::into)
    }

    /// All frames matching every criterion of the filter, ascending id
    pub fn query(&self, filter: &FrameFilter) -> Result<Vec<Frame>> {
        let sql = filter.to_where_clause();
        tracing::debug!(clause = %sql.clause, "Querying frames");
        self.select(
            &format!("{} ORDER BY id", sql.clause),
            params_from_iter(sql.params.iter()),
        )
    }

    /// Count all frames
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM frames", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// First frames by ascending id
    pub fn list(&self, limit: usize) -> Result<Vec<Frame>> {
        self.select(" ORDER BY id LIMIT ?1", [sql_limit(limit)])
    }

    /// Most recently added frames first
    pub fn recent(&self, limit: usize) -> Result<Vec<Frame>> {
        self.select(" ORDER BY created_at DESC, id DESC LIMIT ?1", [sql_limit(limit)])
    }

    /// Frames whose brand equals `brand` ignoring case, by model code
    pub fn by_brand(&self, brand: &str, limit: usize) -> Result<Vec<Frame>> {
        self.select(
            " WHERE ulower(brand) = ulower(?1) ORDER BY model_code, id LIMIT ?2",
            params![brand, sql_limit(limit)],
        )
    }

    /// Frames with at most `threshold` units in stock, lowest first
    pub fn low_stock(&self, threshold: i64, limit: usize) -> Result<Vec<Frame>> {
        self.select(
            " WHERE stock <= ?1 ORDER BY stock, id LIMIT ?2",
            params![threshold, sql_limit(limit)],
        )
    }

    /// Frames for export, newest first
    pub fn export_rows(&self, brand: Option<&str>, since: Option<NaiveDate>, limit: usize) -> Result<Vec<Frame>> {
        let mut conditions = Vec::new();
        let mut bind: Vec<Value> = Vec::new();

        if let Some(brand) = brand {
            bind.push(Value::Text(brand.to_string()));
            conditions.push(format!("ulower(brand) = ulower(?{})", bind.len()));
        }
        if let Some(date) = since {
            let start = date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
            bind.push(Value::Text(format_timestamp(&start)));
            conditions.push(format!("created_at >= ?{}", bind.len()));
        }
        bind.push(Value::Integer(sql_limit(limit)));
        let limit_idx = bind.len();

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        self.select(
            &format!("{} ORDER BY created_at DESC, id DESC LIMIT ?{}", where_clause, limit_idx),
            params_from_iter(bind.iter()),
        )
    }

    fn select<P: Params>(&self, tail: &str, params: P) -> Result<Vec<Frame>> {
        let sql = format!("SELECT {} FROM frames{}", schema::FRAME_COLUMNS, tail);
        let mut stmt = self.conn.prepare(&sql)?;
        let frames = stmt
            .query_map(params, row_to_frame)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(frames)
    }

    // ========== Aggregates ==========

    /// Record counts per material, most common first
    pub fn material_counts(&self, limit: usize) -> Result<Vec<(String, usize)>> {
        let mut stmt = self.conn.prepare(
            "SELECT COALESCE(material, 'unknown') AS m, COUNT(*) AS c FROM frames
             GROUP BY m ORDER BY c DESC, m LIMIT ?1",
        )?;
        let counts = stmt
            .query_map([sql_limit(limit)], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as usize))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(counts)
    }

    /// Groups of frames sharing brand and model code (ignoring case)
    pub fn duplicates(&self, limit: usize) -> Result<Vec<DuplicateGroup>> {
        let mut stmt = self.conn.prepare(
            "SELECT MIN(brand), MIN(model_code), COUNT(*) AS c FROM frames
             GROUP BY ulower(COALESCE(brand, '')), ulower(model_code)
             HAVING c > 1
             ORDER BY c DESC, 2
             LIMIT ?1",
        )?;
        let groups = stmt
            .query_map([sql_limit(limit)], |row| {
                Ok(DuplicateGroup {
                    brand: row.get(0)?,
                    model_code: row.get(1)?,
                    count: row.get::<_, i64>(2)? as usize,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(groups)
    }

    /// Inventory-wide statistics
    pub fn stats(&self) -> Result<InventoryStats> {
        let (frames, brands, total_stock, avg_price) = self.conn.query_row(
            "SELECT COUNT(*), COUNT(DISTINCT brand), COALESCE(SUM(stock), 0), AVG(price) FROM frames",
            [],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, Option<f64>>(3)?,
                ))
            },
        )?;

        let top_brand_by_frames = self.top_brand("COUNT(*)")?;
        let top_brand_by_stock = self.top_brand("SUM(stock)")?;

        Ok(InventoryStats {
            frames: frames as usize,
            brands: brands as usize,
            top_brand_by_frames,
            top_brand_by_stock,
            total_stock,
            avg_price,
        })
    }

    fn top_brand(&self, aggregate: &str) -> Result<Option<BrandTally>> {
        let sql = format!(
            "SELECT brand, {} AS v FROM frames GROUP BY brand ORDER BY v DESC, brand LIMIT 1",
            aggregate
        );
        self.conn
            .query_row(&sql, [], |row| {
                Ok(BrandTally {
                    brand: row.get(0)?,
                    value: row.get(1)?,
                })
            })
            .optional()
            .map_err(Into::into)
    }
}

/// `ulower(text)`: Unicode lowercase, NULL stays NULL
fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "ulower",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )
}

/// Row limits saturate; a negative LIMIT means "no limit" to SQLite
fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// Render a timestamp the way it is stored: fixed-width RFC 3339, nanoseconds, `Z`
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn row_to_frame(row: &rusqlite::Row) -> rusqlite::Result<Frame> {
    let created_str: String = row.get(13)?;
    let created_at = DateTime::parse_from_rfc3339(&created_str)
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(13, rusqlite::types::Type::Text, Box::new(e))
        })?
        .with_timezone(&Utc);

    Ok(Frame {
        id: row.get(0)?,
        attrs: NewFrame {
            brand: row.get(1)?,
            model_code: row.get(2)?,
            material: row.get(3)?,
            lens_width: row.get(4)?,
            bridge_size: row.get(5)?,
            temple_length: row.get(6)?,
            color: row.get(7)?,
            shape: row.get(8)?,
            gender: row.get(9)?,
            price: row.get(10)?,
            stock: row.get(11)?,
            notes: row.get(12)?,
        },
        created_at,
    })
}

/// A brand and an aggregate value (frame count or stock units)
#[derive(Debug, Clone, PartialEq)]
pub struct BrandTally {
    pub brand: Option<String>,
    pub value: i64,
}

/// Frames sharing a brand and model code
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateGroup {
    pub brand: Option<String>,
    pub model_code: String,
    pub count: usize,
}

/// Inventory statistics
#[derive(Debug, Clone)]
pub struct InventoryStats {
    pub frames: usize,
    pub brands: usize,
    pub top_brand_by_frames: Option<BrandTally>,
    pub top_brand_by_stock: Option<BrandTally>,
    pub total_stock: i64,
    pub avg_price: Option<f64>,
}

impl InventoryStats {
    pub fn avg_stock_per_frame(&self) -> Option<f64> {
        (self.frames > 0).then(|| self.total_stock as f64 / self.frames as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SearchCriteria;
    use chrono::TimeZone;

    fn sample(model: &str) -> NewFrame {
        NewFrame::builder(model).build().unwrap()
    }

    fn ids(frames: &[Frame]) -> Vec<FrameId> {
        frames.iter().map(|f| f.id).collect()
    }

    #[test]
    fn test_insert_and_get_roundtrip() {
        let store = FrameStore::open_in_memory().unwrap();
        let input = NewFrame::builder("RB1234")
            .brand("RayBan")
            .material("plastic")
            .lens_width(52)
            .bridge_size(18)
            .temple_length(140)
            .color("matte black")
            .shape("round")
            .gender("unisex")
            .price(120.5)
            .stock(5)
            .notes("spring hinge")
            .build()
            .unwrap();

        let id = store.insert(&input).unwrap();
        assert_eq!(id, 1);

        let stored = store.get(id).unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.attrs, input);
    }

    #[test]
    fn test_roundtrip_with_absent_fields() {
        let store = FrameStore::open_in_memory().unwrap();
        let input = sample("BARE");
        let id = store.insert(&input).unwrap();
        assert_eq!(store.get(id).unwrap().unwrap().attrs, input);
    }

    #[test]
    fn test_created_at_roundtrips_exactly() {
        let store = FrameStore::open_in_memory().unwrap();
        let ts = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap() + chrono::Duration::nanoseconds(123_456_789);
        let id = store.insert_at(&sample("T"), ts).unwrap();
        assert_eq!(store.get(id).unwrap().unwrap().created_at, ts);
    }

    #[test]
    fn test_get_missing_is_none() {
        let store = FrameStore::open_in_memory().unwrap();
        assert!(store.get(42).unwrap().is_none());
    }

    #[test]
    fn test_invalid_frame_not_persisted() {
        let store = FrameStore::open_in_memory().unwrap();
        let mut frame = sample("OK");
        frame.model_code = String::new();
        assert!(store.insert(&frame).unwrap_err().is_validation());

        let mut frame = sample("OK");
        frame.price = Some(-1.0);
        assert!(store.insert(&frame).unwrap_err().is_validation());

        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_ids_are_unique_and_ascending() {
        let store = FrameStore::open_in_memory().unwrap();
        let a = store.insert(&sample("A")).unwrap();
        let b = store.insert(&sample("A")).unwrap();
        assert!(b > a);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_query_all_ordered_by_id() {
        let store = FrameStore::open_in_memory().unwrap();
        for m in ["C", "A", "B"] {
            store.insert(&sample(m)).unwrap();
        }
        let all = store.query(&FrameFilter::all()).unwrap();
        assert_eq!(ids(&all), vec![1, 2, 3]);
    }

    #[test]
    fn test_query_brand_case_insensitive_substring() {
        let store = FrameStore::open_in_memory().unwrap();
        let rayban = store.insert(&NewFrame::builder("1").brand("RayBan").build().unwrap()).unwrap();
        let xray = store.insert(&NewFrame::builder("2").brand("X-ray").build().unwrap()).unwrap();
        store.insert(&NewFrame::builder("3").brand("Oakley").build().unwrap()).unwrap();
        store.insert(&sample("4")).unwrap();

        let filter = SearchCriteria::new().brand("ray").into_filter().unwrap();
        assert_eq!(ids(&store.query(&filter).unwrap()), vec![rayban, xray]);
    }

    #[test]
    fn test_query_text_ignores_case_beyond_ascii() {
        let store = FrameStore::open_in_memory().unwrap();
        let umlaut = store.insert(&NewFrame::builder("1").brand("Ärzte").build().unwrap()).unwrap();
        let cyrillic = store.insert(&NewFrame::builder("2").brand("ОПТИКА").color("Чёрный").build().unwrap()).unwrap();
        store.insert(&NewFrame::builder("3").brand("Oakley").build().unwrap()).unwrap();

        let filter = SearchCriteria::new().brand("ärz").into_filter().unwrap();
        assert_eq!(ids(&store.query(&filter).unwrap()), vec![umlaut]);
        let filter = SearchCriteria::new().brand("оптик").color("ЧЁР").into_filter().unwrap();
        assert_eq!(ids(&store.query(&filter).unwrap()), vec![cyrillic]);

        assert_eq!(ids(&store.by_brand("ärzte", 10).unwrap()), vec![umlaut]);
    }

    #[test]
    fn test_huge_limit_saturates() {
        let store = FrameStore::open_in_memory().unwrap();
        for m in ["A", "B", "C"] {
            store.insert(&sample(m)).unwrap();
        }
        assert_eq!(store.list(usize::MAX).unwrap().len(), 3);
        assert_eq!(store.recent(usize::MAX).unwrap().len(), 3);
        assert_eq!(sql_limit(usize::MAX), i64::MAX);
        assert_eq!(sql_limit(2), 2);
    }

    #[test]
    fn test_query_price_bounds_inclusive_and_exclude_missing() {
        let store = FrameStore::open_in_memory().unwrap();
        store.insert(&NewFrame::builder("p200").price(200.0).build().unwrap()).unwrap();
        store.insert(&sample("none")).unwrap();
        let mid = store.insert(&NewFrame::builder("p120").price(120.0).build().unwrap()).unwrap();
        let low = store.insert(&NewFrame::builder("p50").price(50.0).build().unwrap()).unwrap();
        let high = store.insert(&NewFrame::builder("p150").price(150.0).build().unwrap()).unwrap();

        let filter = SearchCriteria::new().min_price(50.0).max_price(150.0).into_filter().unwrap();
        assert_eq!(ids(&store.query(&filter).unwrap()), vec![mid, low, high]);

        let only_min = SearchCriteria::new().min_price(0.0).into_filter().unwrap();
        assert_eq!(store.query(&only_min).unwrap().len(), 4);
    }

    #[test]
    fn test_query_lens_width_exact() {
        let store = FrameStore::open_in_memory().unwrap();
        for w in [51, 52, 53, 52] {
            store.insert(&NewFrame::builder("L").lens_width(w).build().unwrap()).unwrap();
        }
        let filter = SearchCriteria::new().lens_width(52).into_filter().unwrap();
        assert_eq!(ids(&store.query(&filter).unwrap()), vec![2, 4]);
    }

    #[test]
    fn test_query_like_wildcards_are_literal() {
        let store = FrameStore::open_in_memory().unwrap();
        store.insert(&NewFrame::builder("A_1").build().unwrap()).unwrap();
        store.insert(&NewFrame::builder("AB1").build().unwrap()).unwrap();
        let filter = SearchCriteria::new().model_code("a_").into_filter().unwrap();
        assert_eq!(ids(&store.query(&filter).unwrap()), vec![1]);
    }

    #[test]
    fn test_query_no_match_is_empty() {
        let store = FrameStore::open_in_memory().unwrap();
        store.insert(&sample("A")).unwrap();
        let filter = SearchCriteria::new().color("green").into_filter().unwrap();
        assert!(store.query(&filter).unwrap().is_empty());
    }

    #[test]
    fn test_initialize_drop_discards_records() {
        let store = FrameStore::open_in_memory().unwrap();
        store.insert(&sample("A")).unwrap();
        store.initialize(false).unwrap();
        assert_eq!(store.count().unwrap(), 1);

        store.initialize(true).unwrap();
        assert!(store.query(&FrameFilter::all()).unwrap().is_empty());
        assert_eq!(store.insert(&sample("B")).unwrap(), 1);
    }

    #[test]
    fn test_list_recent_and_low_stock() {
        let store = FrameStore::open_in_memory().unwrap();
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        for (i, stock) in [7, 1, 3].into_iter().enumerate() {
            let frame = NewFrame::builder(format!("M{}", i)).stock(stock).build().unwrap();
            store.insert_at(&frame, base + chrono::Duration::days(i as i64)).unwrap();
        }

        assert_eq!(ids(&store.list(2).unwrap()), vec![1, 2]);
        assert_eq!(ids(&store.recent(2).unwrap()), vec![3, 2]);
        assert_eq!(ids(&store.low_stock(3, 10).unwrap()), vec![2, 3]);
    }

    #[test]
    fn test_by_brand_exact_ignoring_case() {
        let store = FrameStore::open_in_memory().unwrap();
        store.insert(&NewFrame::builder("Z9").brand("Oakley").build().unwrap()).unwrap();
        store.insert(&NewFrame::builder("A1").brand("oakley").build().unwrap()).unwrap();
        store.insert(&NewFrame::builder("B2").brand("Oakley Pro").build().unwrap()).unwrap();

        let found = store.by_brand("OAKLEY", 10).unwrap();
        let models: Vec<_> = found.iter().map(|f| f.model_code.as_str()).collect();
        assert_eq!(models, vec!["A1", "Z9"]);
    }

    #[test]
    fn test_duplicates_and_materials() {
        let store = FrameStore::open_in_memory().unwrap();
        store.insert(&NewFrame::builder("RB1").brand("RayBan").material("metal").build().unwrap()).unwrap();
        store.insert(&NewFrame::builder("rb1").brand("rayban").material("metal").build().unwrap()).unwrap();
        store.insert(&NewFrame::builder("X").build().unwrap()).unwrap();
        store.insert(&NewFrame::builder("X").build().unwrap()).unwrap();
        store.insert(&NewFrame::builder("Y").brand("Oakley").build().unwrap()).unwrap();

        let groups = store.duplicates(10).unwrap();
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.count == 2));
        assert!(groups.iter().any(|g| g.brand.is_none() && g.model_code == "X"));

        let materials = store.material_counts(5).unwrap();
        assert_eq!(materials[0], ("unknown".to_string(), 3));
        assert_eq!(materials[1], ("metal".to_string(), 2));
    }

    #[test]
    fn test_stats() {
        let store = FrameStore::open_in_memory().unwrap();
        let empty = store.stats().unwrap();
        assert_eq!(empty.frames, 0);
        assert!(empty.top_brand_by_frames.is_none());
        assert!(empty.avg_stock_per_frame().is_none());

        store.insert(&NewFrame::builder("A").brand("RayBan").stock(1).price(100.0).build().unwrap()).unwrap();
        store.insert(&NewFrame::builder("B").brand("RayBan").stock(1).build().unwrap()).unwrap();
        store.insert(&NewFrame::builder("C").brand("Oakley").stock(10).price(200.0).build().unwrap()).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.frames, 3);
        assert_eq!(stats.brands, 2);
        assert_eq!(stats.total_stock, 12);
        assert_eq!(stats.avg_price, Some(150.0));
        assert_eq!(stats.top_brand_by_frames.as_ref().unwrap().brand.as_deref(), Some("RayBan"));
        assert_eq!(stats.top_brand_by_stock.as_ref().unwrap().value, 10);
        assert_eq!(stats.avg_stock_per_frame(), Some(4.0));
    }

    #[test]
    fn test_export_rows_filters() {
        let store = FrameStore::open_in_memory().unwrap();
        let jan = Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap();
        let mar = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        store.insert_at(&NewFrame::builder("A").brand("Ray").build().unwrap(), jan).unwrap();
        store.insert_at(&NewFrame::builder("B").brand("ray").build().unwrap(), mar).unwrap();
        store.insert_at(&NewFrame::builder("C").brand("Rayban").build().unwrap(), mar).unwrap();

        let since = NaiveDate::from_ymd_opt(2025, 2, 1);
        let rows = store.export_rows(Some("RAY"), since, 100).unwrap();
        assert_eq!(ids(&rows), vec![2]);

        let rows = store.export_rows(None, None, 2).unwrap();
        assert_eq!(ids(&rows), vec![3, 2]);
    }

    #[test]
    fn test_open_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output").join("frames.db");
        {
            let store = FrameStore::open(&path).unwrap();
            store.insert(&sample("A")).unwrap();
            assert_eq!(store.path(), Some(path.as_path()));
        }
        assert!(path.exists());

        let reopened = FrameStore::open(&path).unwrap();
        assert_eq!(reopened.count().unwrap(), 1);
    }
}
