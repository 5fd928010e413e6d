//! Normalized filter and its SQL translation

use rusqlite::types::Value;

/// Text columns that support case-insensitive substring matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Brand,
    ModelCode,
    Material,
    Color,
    Shape,
    Gender,
}

impl TextField {
    /// Column name in the frames table
    pub fn column(&self) -> &'static str {
        match self {
            TextField::Brand => "brand",
            TextField::ModelCode => "model_code",
            TextField::Material => "material",
            TextField::Color => "color",
            TextField::Shape => "shape",
            TextField::Gender => "gender",
        }
    }
}

/// A conjunction of search constraints. Built through `SearchCriteria::into_filter`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameFilter {
    text: Vec<(TextField, String)>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    lens_width: Option<i64>,
}

/// A parameterized WHERE clause. `clause` is empty when nothing is constrained.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFragment {
    pub clause: String,
    pub params: Vec<Value>,
}

impl FrameFilter {
    pub(crate) fn new(
        text: Vec<(TextField, String)>,
        min_price: Option<f64>,
        max_price: Option<f64>,
        lens_width: Option<i64>,
    ) -> Self {
        Self {
            text,
            min_price,
            max_price,
            lens_width,
        }
    }

    /// A filter matching every record
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.lens_width.is_none()
    }

    pub fn text_criteria(&self) -> &[(TextField, String)] {
        &self.text
    }

    /// Compile into ` WHERE ...` with numbered placeholders.
    ///
    /// Text criteria compare Unicode-lowercased text with `LIKE`, the user's
    /// value escaped so `%` and `_` match literally. Relies on the `ulower`
    /// function the store registers. A NULL price never satisfies a price bound.
    pub fn to_where_clause(&self) -> SqlFragment {
        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        for (field, value) in &self.text {
            params.push(Value::Text(escape_like(&value.to_lowercase())));
            conditions.push(format!(
                "ulower({}) LIKE '%' || ?{} || '%' ESCAPE '\\'",
                field.column(),
                params.len()
            ));
        }

        if let Some(min) = self.min_price {
            params.push(Value::Real(min));
            conditions.push(format!("price >= ?{}", params.len()));
        }

        if let Some(max) = self.max_price {
            params.push(Value::Real(max));
            conditions.push(format!("price <= ?{}", params.len()));
        }

        if let Some(width) = self.lens_width {
            params.push(Value::Integer(width));
            conditions.push(format!("lens_width = ?{}", params.len()));
        }

        let clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        SqlFragment { clause, params }
    }
}

fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SearchCriteria;

    #[test]
    fn test_empty_filter_has_no_clause() {
        let sql = FrameFilter::all().to_where_clause();
        assert!(sql.clause.is_empty());
        assert!(sql.params.is_empty());
    }

    #[test]
    fn test_conditions_are_conjoined_in_order() {
        let filter = SearchCriteria::new()
            .brand("Ray")
            .min_price(50.0)
            .max_price(150.0)
            .lens_width(52)
            .into_filter()
            .unwrap();
        let sql = filter.to_where_clause();

        assert_eq!(
            sql.clause,
            " WHERE ulower(brand) LIKE '%' || ?1 || '%' ESCAPE '\\' AND price >= ?2 AND price <= ?3 AND lens_width = ?4"
        );
        assert_eq!(
            sql.params,
            vec![
                Value::Text("ray".to_string()),
                Value::Real(50.0),
                Value::Real(150.0),
                Value::Integer(52),
            ]
        );
    }

    #[test]
    fn test_like_wildcards_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }
}
