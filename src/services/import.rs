//! Transaction and goal import
//!
//! Reads caller-owned records from CSV or JSON files. Transactions CSV files
//! carry a header with `date`, `type`, `category` and `amount` columns (in
//! any order, plus an optional `memo`). Rows that fail to parse are skipped
//! and reported rather than aborting the whole import.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{GoalId, Money, SavingGoal, Transaction, TransactionKind};

/// Parse a date or date-time
///
/// Accepts `YYYY-MM-DD` (midnight) and `YYYY-MM-DDTHH:MM:SS` with optional
/// fractional seconds; a space may stand in for the `T`.
pub fn parse_timestamp(s: &str) -> BudgetResult<NaiveDateTime> {
    let s = s.trim();
    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| BudgetError::Validation(format!("Could not parse date: '{}'", s)))
}

/// Column positions for a transactions CSV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date_column: usize,
    pub type_column: usize,
    pub category_column: usize,
    pub amount_column: usize,
    pub memo_column: Option<usize>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            date_column: 0,
            type_column: 1,
            category_column: 2,
            amount_column: 3,
            memo_column: None,
        }
    }
}

impl ColumnMapping {
    /// Locate columns by header name, falling back to the default order for
    /// any that are missing
    pub fn from_headers(headers: &StringRecord) -> Self {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
        };

        let defaults = Self::default();
        Self {
            date_column: find(&["date", "timestamp"]).unwrap_or(defaults.date_column),
            type_column: find(&["type", "kind"]).unwrap_or(defaults.type_column),
            category_column: find(&["category"]).unwrap_or(defaults.category_column),
            amount_column: find(&["amount"]).unwrap_or(defaults.amount_column),
            memo_column: find(&["memo", "notes", "description"]),
        }
    }
}

/// Transactions read from a file, plus the rows that were skipped
#[derive(Debug, Clone, Default)]
pub struct TransactionImport {
    pub transactions: Vec<Transaction>,
    /// Error message by 1-based data row number
    pub skipped: BTreeMap<usize, String>,
}

impl TransactionImport {
    pub fn has_errors(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Parse a transactions CSV from any reader
pub fn parse_transactions_csv<R: std::io::Read>(reader: R) -> BudgetResult<TransactionImport> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mapping = ColumnMapping::from_headers(reader.headers()?);
    debug!(?mapping, "csv column mapping");

    let mut import = TransactionImport::default();
    for (idx, result) in reader.records().enumerate() {
        let row = idx + 1;
        let parsed = result
            .map_err(|e| format!("Error reading CSV record: {}", e))
            .and_then(|record| parse_record(&record, &mapping));

        match parsed {
            Ok(txn) => import.transactions.push(txn),
            Err(message) => {
                warn!(row, %message, "skipping transaction row");
                import.skipped.insert(row, message);
            }
        }
    }

    Ok(import)
}

fn parse_record(record: &StringRecord, mapping: &ColumnMapping) -> Result<Transaction, String> {
    let field = |col: usize, name: &str| {
        record
            .get(col)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| format!("Missing {} column", name))
    };

    let date = parse_timestamp(field(mapping.date_column, "date")?).map_err(|e| e.to_string())?;
    let kind: TransactionKind = field(mapping.type_column, "type")?.parse()?;
    let category = field(mapping.category_column, "category")?;
    let amount = parse_amount(field(mapping.amount_column, "amount")?)?;

    let mut txn = Transaction::new(kind, amount, category, date);
    if let Some(memo) = mapping.memo_column.and_then(|col| record.get(col)) {
        txn = txn.with_memo(memo.trim());
    }
    Ok(txn)
}

/// Amounts are stored positive; a leading minus only restates the direction
fn parse_amount(s: &str) -> Result<Money, String> {
    let amount = Money::parse(s).map_err(|e| format!("Invalid amount '{}': {}", s, e))?;
    amount
        .checked_abs()
        .ok_or_else(|| format!("Invalid amount '{}'", s))
}

/// Whole cents from a JSON number, rejecting values outside the `i64` range
fn number_to_money(n: f64) -> Result<Money, String> {
    let cents = (n * 100.0).round();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if !cents.is_finite() || cents >= i64::MAX as f64 || cents <= i64::MIN as f64 {
        return Err(format!("Invalid amount: {}", n));
    }
    Ok(Money::from_cents((cents as i64).abs()))
}

/// A numeric or textual amount in JSON input
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AmountField {
    Number(f64),
    Text(String),
}

impl AmountField {
    fn to_money(&self) -> Result<Money, String> {
        match self {
            Self::Number(n) => number_to_money(*n),
            Self::Text(s) => parse_amount(s),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TransactionRecord {
    #[serde(rename = "type")]
    kind: TransactionKind,
    category: String,
    amount: AmountField,
    date: String,
    #[serde(default)]
    memo: String,
}

impl TransactionRecord {
    fn into_transaction(self) -> BudgetResult<Transaction> {
        let amount = self.amount.to_money().map_err(BudgetError::Import)?;
        let date = parse_timestamp(&self.date)?;
        Ok(Transaction::new(self.kind, amount, self.category, date).with_memo(self.memo))
    }
}

/// Parse a JSON array of transactions
///
/// Unlike CSV import, any bad record fails the whole file.
pub fn parse_transactions_json(contents: &str) -> BudgetResult<Vec<Transaction>> {
    let records: Vec<TransactionRecord> = serde_json::from_str(contents)?;
    records
        .into_iter()
        .map(TransactionRecord::into_transaction)
        .collect()
}

#[derive(Debug, Deserialize)]
struct GoalRecord {
    #[serde(default)]
    id: Option<GoalId>,
    name: String,
    target: AmountField,
    #[serde(default)]
    saved: Option<AmountField>,
    deadline: String,
    created_at: String,
}

impl GoalRecord {
    fn into_goal(self) -> BudgetResult<SavingGoal> {
        let target = self.target.to_money().map_err(BudgetError::Import)?;
        let saved = match &self.saved {
            Some(amount) => amount.to_money().map_err(BudgetError::Import)?,
            None => Money::zero(),
        };
        let mut goal = SavingGoal::new(
            self.name,
            target,
            saved,
            parse_timestamp(&self.deadline)?,
            parse_timestamp(&self.created_at)?,
        );
        if let Some(id) = self.id {
            goal.id = id;
        }
        goal.validate()
            .map_err(|e| BudgetError::Validation(format!("Goal '{}': {}", goal.name, e)))?;
        Ok(goal)
    }
}

/// Parse a JSON array of saving goals
pub fn parse_goals_json(contents: &str) -> BudgetResult<Vec<SavingGoal>> {
    let records: Vec<GoalRecord> = serde_json::from_str(contents)?;
    records.into_iter().map(GoalRecord::into_goal).collect()
}

/// Load transactions from a `.json` or `.csv` file
pub fn load_transactions(path: &Path) -> BudgetResult<TransactionImport> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| BudgetError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    let import = if is_json(path) {
        TransactionImport {
            transactions: parse_transactions_json(&contents)?,
            skipped: BTreeMap::new(),
        }
    } else {
        parse_transactions_csv(contents.as_bytes())?
    };

    debug!(
        path = %path.display(),
        loaded = import.transactions.len(),
        skipped = import.skipped.len(),
        "loaded transactions"
    );
    Ok(import)
}

/// Load saving goals from a JSON file
pub fn load_goals(path: &Path) -> BudgetResult<Vec<SavingGoal>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| BudgetError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    parse_goals_json(&contents)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_parse_timestamp() {
        let midnight = parse_timestamp("2025-03-17").unwrap();
        assert_eq!(midnight.to_string(), "2025-03-17 00:00:00");

        let with_time = parse_timestamp("2025-03-17T14:30:00").unwrap();
        assert_eq!(with_time.to_string(), "2025-03-17 14:30:00");

        let with_millis = parse_timestamp("2025-03-17 23:59:59.999").unwrap();
        assert_eq!(with_millis.to_string(), "2025-03-17 23:59:59.999");

        assert!(parse_timestamp("03/17/2025").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn test_parse_csv() {
        let data = "\
date,type,category,amount
2025-03-01,income,Salary,4000.00
2025-03-02,expense,Rent,\"1,200.00\"
2025-03-10,expense,Dining,$300
";
        let import = parse_transactions_csv(data.as_bytes()).unwrap();
        assert!(!import.has_errors());
        assert_eq!(import.transactions.len(), 3);
        assert!(import.transactions[0].is_income());
        assert_eq!(import.transactions[1].amount, Money::from_dollars(1200));
        assert_eq!(import.transactions[2].category, "Dining");
    }

    #[test]
    fn test_csv_columns_by_header_name() {
        let data = "\
Amount,Category,Type,Date,Memo
12.50,Groceries,expense,2025-03-05,weekly shop
";
        let import = parse_transactions_csv(data.as_bytes()).unwrap();
        let txn = &import.transactions[0];
        assert_eq!(txn.amount, Money::from_cents(1250));
        assert_eq!(txn.category, "Groceries");
        assert_eq!(txn.memo, "weekly shop");
    }

    #[test]
    fn test_csv_skips_bad_rows() {
        let data = "\
date,type,category,amount
2025-03-01,income,Salary,4000
not-a-date,expense,Rent,100
2025-03-03,transfer,Rent,100
2025-03-04,expense,,100
2025-03-05,expense,Rent,abc
";
        let import = parse_transactions_csv(data.as_bytes()).unwrap();
        assert_eq!(import.transactions.len(), 1);
        assert_eq!(import.skipped.len(), 4);
        assert!(import.skipped[&2].contains("date"));
        assert!(import.skipped[&3].contains("transaction type"));
        assert!(import.skipped[&4].contains("category"));
    }

    #[test]
    fn test_negative_amount_is_stored_positive() {
        let data = "date,type,category,amount\n2025-03-01,expense,Rent,-50\n";
        let import = parse_transactions_csv(data.as_bytes()).unwrap();
        assert_eq!(import.transactions[0].amount, Money::from_dollars(50));
    }

    #[test]
    fn test_parse_json_transactions() {
        let json = r#"[
            {"type": "income", "category": "Salary", "amount": 4000, "date": "2025-03-01"},
            {"type": "expense", "category": "Dining", "amount": "12.34", "date": "2025-03-02T19:00:00"}
        ]"#;
        let txns = parse_transactions_json(json).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].amount, Money::from_dollars(4000));
        assert_eq!(txns[1].amount, Money::from_cents(1234));
        assert_eq!(txns[1].date.to_string(), "2025-03-02 19:00:00");

        let bad = r#"[{"type": "expense", "category": "Rent", "amount": 10, "date": "someday"}]"#;
        assert!(parse_transactions_json(bad).is_err());
    }

    #[test]
    fn test_huge_json_amounts_are_import_errors() {
        for amount in ["-1e30", "1e30", "92233720368547758.08", "\"-92233720368547758.08\""] {
            let json = format!(
                r#"[{{"type": "expense", "category": "Rent", "amount": {}, "date": "2025-03-01"}}]"#,
                amount
            );
            let err = parse_transactions_json(&json).unwrap_err();
            assert!(matches!(err, BudgetError::Import(_)), "{}: {:?}", amount, err);
        }

        let json = r#"[{"type": "expense", "category": "Rent", "amount": -1200.5, "date": "2025-03-01"}]"#;
        assert_eq!(parse_transactions_json(json).unwrap()[0].amount, Money::from_cents(120050));
    }

    #[test]
    fn test_huge_csv_amount_is_skipped() {
        let data = "date,type,category,amount\n2025-03-01,expense,Rent,-100000000000000000\n2025-03-02,expense,Food,5\n";
        let import = parse_transactions_csv(data.as_bytes()).unwrap();
        assert_eq!(import.transactions.len(), 1);
        assert!(import.skipped.contains_key(&2));
    }

    #[test]
    fn test_parse_goals_json() {
        let json = r#"[
            {"name": "Emergency fund", "target": 1200, "saved": 300,
             "deadline": "2026-01-01", "created_at": "2025-01-01"}
        ]"#;
        let goals = parse_goals_json(json).unwrap();
        assert_eq!(goals[0].name, "Emergency fund");
        assert_eq!(goals[0].amount_remaining(), Money::from_dollars(900));

        let invalid = r#"[{"name": "Bad", "target": 0, "deadline": "2026-01-01", "created_at": "2025-01-01"}]"#;
        assert!(parse_goals_json(invalid).is_err());
    }

    #[test]
    fn test_load_transactions_by_extension() {
        let mut csv_file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(csv_file, "date,type,category,amount").unwrap();
        writeln!(csv_file, "2025-03-01,income,Salary,100").unwrap();
        let import = load_transactions(csv_file.path()).unwrap();
        assert_eq!(import.transactions.len(), 1);

        let mut json_file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            json_file,
            r#"[{{"type": "expense", "category": "Rent", "amount": 5, "date": "2025-03-01"}}]"#
        )
        .unwrap();
        let import = load_transactions(json_file.path()).unwrap();
        assert!(import.transactions[0].is_expense());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_transactions(Path::new("/nonexistent/transactions.csv")).unwrap_err();
        assert!(matches!(err, BudgetError::Io(_)));
    }
}
