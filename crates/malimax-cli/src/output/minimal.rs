use serde_json::Value;

use super::cell;

/// Headline fields, most specific first.
const PRIORITY_KEYS: [&str; 6] = [
    "projected_balance_6m",
    "monthly_payment",
    "avg_profit",
    "cashflow",
    "months_until_critical",
    "revised_monthly_profit",
];

/// Print just the key answer value from the output.
///
/// Looks inside the `result` envelope (or a ledger's `kpi` block) for the
/// first non-null priority field, then falls back to the first field.
pub fn print_minimal(value: &Value) {
    let obj = value
        .get("result")
        .or_else(|| value.get("kpi"))
        .unwrap_or(value);

    if let Value::Object(map) = obj {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key) {
                if !val.is_null() {
                    println!("{}", cell(val));
                    return;
                }
            }
        }
        if let Some((key, val)) = map.iter().next() {
            println!("{key}: {}", cell(val));
            return;
        }
    }

    if let Value::Array(items) = obj {
        println!("{} rows", items.len());
        return;
    }

    println!("{}", cell(obj));
}
