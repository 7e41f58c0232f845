//! Filter/sort/page logic behind the table view's data endpoint.
//!
//! Implements the DataTables server-side contract over an in-memory slice of
//! records: case-insensitive substring search across every field, multi-key
//! ordering against a fixed column allowlist, and offset/limit pagination.
//! The HTTP layer only parses request parameters and hands them here.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::record::CarSaleRecord;
use crate::schema;

/// One `order[i]` clause from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderClause {
    /// Column name, matched against the schema allowlist.
    pub column: String,
    pub descending: bool,
}

/// Decoded request parameters for one table-view query.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    /// Opaque request token, echoed back unchanged.
    pub draw: u64,
    pub search: Option<String>,
    pub order: Vec<OrderClause>,
    pub start: usize,
    pub length: usize,
}

/// One page of the response.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryPage {
    pub data: Vec<CarSaleRecord>,
    #[serde(rename = "recordsTotal")]
    pub records_total: usize,
    #[serde(rename = "recordsFiltered")]
    pub records_filtered: usize,
    pub draw: u64,
}

/// Run one query over the full record set.
#[must_use]
pub fn run_query(records: &[CarSaleRecord], params: &QueryParams) -> QueryPage {
    let records_total = records.len();

    let mut filtered: Vec<CarSaleRecord> = match params.search.as_deref() {
        Some(term) if !term.is_empty() => {
            let needle = term.to_lowercase();
            records
                .iter()
                .filter(|r| matches_search(r, &needle))
                .cloned()
                .collect()
        }
        _ => records.to_vec(),
    };
    let records_filtered = filtered.len();

    // An out-of-allowlist column halts processing of further order clauses.
    // It does not error the request; earlier clauses still apply.
    let mut clauses: Vec<&OrderClause> = Vec::new();
    for clause in &params.order {
        if !schema::is_column(&clause.column) {
            break;
        }
        clauses.push(clause);
    }

    // Stable sorts applied in reverse make clause 0 the primary key.
    for clause in clauses.iter().rev() {
        filtered.sort_by(|a, b| {
            let ord = compare_field(a, b, &clause.column);
            if clause.descending {
                ord.reverse()
            } else {
                ord
            }
        });
    }

    let data: Vec<CarSaleRecord> = filtered
        .into_iter()
        .skip(params.start)
        .take(params.length)
        .collect();

    QueryPage {
        data,
        records_total,
        records_filtered,
        draw: params.draw,
    }
}

fn matches_search(record: &CarSaleRecord, needle: &str) -> bool {
    record
        .field_texts()
        .iter()
        .any(|text| text.to_lowercase().contains(needle))
}

fn compare_field(a: &CarSaleRecord, b: &CarSaleRecord, column: &str) -> Ordering {
    match column {
        "id" => a.id.cmp(&b.id),
        "model" => a.model.cmp(&b.model),
        "brand" => a.brand.cmp(&b.brand),
        "transmission" => a.transmission.cmp(&b.transmission),
        "plate_no" => a.plate_no.cmp(&b.plate_no),
        // Unknown mileage sorts after every known value.
        "mileage" => mileage_key(a.mileage).cmp(&mileage_key(b.mileage)),
        "color" => a.color.cmp(&b.color),
        "price" => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

fn mileage_key(mileage: Option<i64>) -> i64 {
    mileage.unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, plate: &str, color: &str, mileage: Option<i64>, price: f64) -> CarSaleRecord {
        CarSaleRecord {
            id,
            model: 2014,
            brand: format!("Brand {id}"),
            transmission: "AT".to_string(),
            plate_no: plate.to_string(),
            mileage,
            color: color.to_string(),
            price,
        }
    }

    fn fleet() -> Vec<CarSaleRecord> {
        (1..=20)
            .map(|i| {
                let color = if i % 7 == 0 { "Maroon" } else { "Silver" };
                record(
                    i,
                    &format!("PLT-{i:03}"),
                    color,
                    Some(i * 1_000),
                    100_000.0 + f64::from(i as i32),
                )
            })
            .collect()
    }

    #[test]
    fn search_counts_and_page_size() {
        // 20 records, "maroon" matches ids 7 and 14; "plt-001" matches one.
        let mut records = fleet();
        records[2].color = "Maroon".to_string();

        let page = run_query(
            &records,
            &QueryParams {
                draw: 3,
                search: Some("maroon".to_string()),
                order: vec![],
                start: 0,
                length: 2,
            },
        );

        assert_eq!(page.records_total, 20);
        assert_eq!(page.records_filtered, 3);
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.draw, 3);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let records = fleet();
        let page = run_query(
            &records,
            &QueryParams {
                search: Some("plt-005".to_string()),
                length: 10,
                ..Default::default()
            },
        );
        assert_eq!(page.records_filtered, 1);
        assert_eq!(page.data[0].id, 5);
    }

    #[test]
    fn unknown_order_column_halts_later_clauses() {
        let mut records = fleet();
        records[0].color = "Azure".to_string();

        let page = run_query(
            &records,
            &QueryParams {
                order: vec![
                    OrderClause {
                        column: "owner".to_string(),
                        descending: false,
                    },
                    OrderClause {
                        column: "color".to_string(),
                        descending: false,
                    },
                ],
                length: 20,
                ..Default::default()
            },
        );

        // The color clause sits behind the unknown one, so original order holds.
        assert_eq!(page.data[0].id, 1);
        assert_eq!(page.data[1].id, 2);
    }

    #[test]
    fn unknown_mileage_sorts_last_ascending() {
        let records = vec![
            record(1, "A-1", "Red", Some(50_000), 1.0),
            record(2, "A-2", "Red", None, 2.0),
            record(3, "A-3", "Red", Some(10_000), 3.0),
        ];
        let page = run_query(
            &records,
            &QueryParams {
                order: vec![OrderClause {
                    column: "mileage".to_string(),
                    descending: false,
                }],
                length: 3,
                ..Default::default()
            },
        );
        let ids: Vec<i64> = page.data.iter().map(|r| r.id).collect();
        assert_eq!(ids, [3, 1, 2]);
    }

    #[test]
    fn first_clause_is_primary_sort_key() {
        let records = vec![
            record(1, "A-1", "Red", Some(1), 5.0),
            record(2, "A-2", "Blue", Some(2), 5.0),
            record(3, "A-3", "Blue", Some(3), 1.0),
        ];
        let page = run_query(
            &records,
            &QueryParams {
                order: vec![
                    OrderClause {
                        column: "color".to_string(),
                        descending: false,
                    },
                    OrderClause {
                        column: "price".to_string(),
                        descending: false,
                    },
                ],
                length: 3,
                ..Default::default()
            },
        );
        let ids: Vec<i64> = page.data.iter().map(|r| r.id).collect();
        assert_eq!(ids, [3, 2, 1]);
    }

    #[test]
    fn pagination_clamps_at_the_end() {
        let records = fleet();
        let page = run_query(
            &records,
            &QueryParams {
                start: 18,
                length: 10,
                ..Default::default()
            },
        );
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.records_total, 20);
    }
}
