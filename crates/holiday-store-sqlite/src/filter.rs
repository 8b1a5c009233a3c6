//! Translation of [`HolidayQuery`] and [`Sort`] into SQL fragments.
//!
//! The WHERE clause starts from "match all" and gains one condition per
//! present filter; the bound values are collected alongside in placeholder
//! order.

use holiday_core::query::{Direction, HolidayQuery, Sort, SortField};
use rusqlite::types::Value;

use crate::encode::encode_date;

/// A WHERE clause (possibly empty) and its positional arguments.
#[derive(Debug, Default)]
pub struct Filter {
  pub where_clause: String,
  pub args:         Vec<Value>,
}

impl Filter {
  pub fn from_query(query: &HolidayQuery) -> Self {
    let mut conds: Vec<String> = vec![];
    let mut args: Vec<Value> = vec![];

    let mut push = |cond: &str, value: Value| {
      args.push(value);
      conds.push(format!("{cond} ?{}", args.len()));
    };

    if let Some(year) = query.year {
      push("h.holiday_year =", Value::Integer(year.into()));
    }
    if let Some(code) = &query.country_code {
      push("h.country_code =", Value::Text(code.clone()));
    }
    if let Some(from) = query.from {
      push("h.holiday_date >=", Value::Text(encode_date(from)));
    }
    if let Some(to) = query.to {
      push("h.holiday_date <=", Value::Text(encode_date(to)));
    }
    if let Some(type_code) = &query.type_code {
      push("h.type_code =", Value::Text(type_code.clone()));
    }

    let where_clause = if conds.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", conds.join(" AND "))
    };

    Self { where_clause, args }
  }
}

/// `ORDER BY` clause for `sort`, always ending with the id as tie-breaker.
pub fn order_by(sort: Sort) -> String {
  let column = match sort.field {
    SortField::Date => "h.holiday_date",
    SortField::Id => "h.id",
    SortField::Name => "h.name",
    SortField::Year => "h.holiday_year",
    SortField::CountryCode => "h.country_code",
  };
  let direction = match sort.direction {
    Direction::Asc => "ASC",
    Direction::Desc => "DESC",
  };
  if sort.field == SortField::Id {
    format!("ORDER BY {column} {direction}")
  } else {
    format!("ORDER BY {column} {direction}, h.id ASC")
  }
}
