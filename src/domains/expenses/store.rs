//! SQLite-backed expense store.

use rusqlite::{Connection, Row, params};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use super::error::{StoreError, StoreResult};
use super::model::{CategoryTotal, Expense, ExpenseDraft, MutationOutcome};
use crate::core::config::ExpenseConfig;

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS expenses (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    date        TEXT,
    amount      REAL,
    category    TEXT,
    subcategory TEXT DEFAULT '',
    note        TEXT DEFAULT ''
)";

const SELECT_COLUMNS: &str = "id, date, amount, category, subcategory, note";

/// Handle to the expense database file.
///
/// Holds only the path. Each operation opens a fresh [`Connection`], runs one
/// statement and drops it; concurrent writers are serialized by SQLite's
/// file lock.
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    db_path: PathBuf,
}

impl ExpenseStore {
    /// Create a store for the database at `db_path`.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Create a store from the expense configuration.
    pub fn from_config(config: &ExpenseConfig) -> Self {
        Self::new(config.db_path.clone())
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> StoreResult<Connection> {
        Connection::open(&self.db_path).map_err(|e| StoreError::unavailable(&self.db_path, e))
    }

    /// Create the `expenses` table if it does not exist yet.
    pub fn init_schema(&self) -> StoreResult<()> {
        let conn = self.connect()?;
        conn.execute(CREATE_TABLE_SQL, [])?;
        info!("Expense schema ready at {:?}", self.db_path);
        Ok(())
    }

    /// Insert a new expense and return its assigned id.
    #[instrument(skip_all, fields(category = %draft.category))]
    pub fn create(&self, draft: &ExpenseDraft) -> StoreResult<MutationOutcome> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO expenses (date, amount, category, subcategory, note)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                draft.date,
                draft.amount,
                draft.category,
                draft.subcategory,
                draft.note
            ],
        )?;
        let id = conn.last_insert_rowid();
        debug!("Inserted expense {}", id);
        Ok(MutationOutcome::success(id))
    }

    /// All expenses, ascending by id.
    pub fn list_all(&self) -> StoreResult<Vec<Expense>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM expenses ORDER BY id ASC"
        ))?;
        let rows = stmt
            .query_map([], expense_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Expenses whose `date` text lies in `[start_date, end_date]`, ascending by date.
    pub fn list_in_range(&self, start_date: &str, end_date: &str) -> StoreResult<Vec<Expense>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM expenses
             WHERE date BETWEEN ?1 AND ?2
             ORDER BY date ASC, id ASC"
        ))?;
        let rows = stmt
            .query_map(params![start_date, end_date], expense_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Replace every field except `id` of the matching row.
    #[instrument(skip(self, draft))]
    pub fn update(&self, id: i64, draft: &ExpenseDraft) -> StoreResult<MutationOutcome> {
        let conn = self.connect()?;
        let affected = conn.execute(
            "UPDATE expenses
             SET date = ?1, amount = ?2, category = ?3, subcategory = ?4, note = ?5
             WHERE id = ?6",
            params![
                draft.date,
                draft.amount,
                draft.category,
                draft.subcategory,
                draft.note,
                id
            ],
        )?;
        Ok(MutationOutcome::from_affected(id, affected))
    }

    /// Remove the matching row.
    #[instrument(skip(self))]
    pub fn delete(&self, id: i64) -> StoreResult<MutationOutcome> {
        let conn = self.connect()?;
        let affected = conn.execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
        Ok(MutationOutcome::from_affected(id, affected))
    }

    /// Per-category totals over a date range, optionally restricted to one category.
    pub fn summarize(
        &self,
        start_date: &str,
        end_date: &str,
        category: Option<&str>,
    ) -> StoreResult<Vec<CategoryTotal>> {
        let conn = self.connect()?;
        // `None` means all categories: `(?3 IS NULL OR category = ?3)`.
        let mut stmt = conn.prepare(
            "SELECT category, SUM(amount) AS total_amount
             FROM expenses
             WHERE date BETWEEN ?1 AND ?2
               AND (?3 IS NULL OR category = ?3)
             GROUP BY category
             ORDER BY category ASC",
        )?;
        let totals = stmt
            .query_map(params![start_date, end_date, category], |row| {
                Ok(CategoryTotal {
                    category: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                    total_amount: row.get::<_, Option<f64>>(1)?.unwrap_or(0.0),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(totals)
    }
}

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        date: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        amount: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
        category: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        subcategory: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        note: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::expenses::MutationStatus;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, ExpenseStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expenses.db"));
        store.init_schema().unwrap();
        (temp_dir, store)
    }

    fn food(date: &str, amount: f64) -> ExpenseDraft {
        ExpenseDraft::new(date, amount, "food")
    }

    #[test]
    fn test_init_schema_is_idempotent() {
        let (_dir, store) = test_store();
        store.init_schema().unwrap();
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_create_then_list() {
        let (_dir, store) = test_store();
        let draft = food("2024-01-01", 12.5)
            .with_subcategory("groceries")
            .with_note("market");

        let outcome = store.create(&draft).unwrap();
        assert_eq!(outcome.status, MutationStatus::Success);

        let rows = store.list_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0],
            Expense {
                id: outcome.id,
                date: "2024-01-01".to_string(),
                amount: 12.5,
                category: "food".to_string(),
                subcategory: "groceries".to_string(),
                note: "market".to_string(),
            }
        );
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let (_dir, store) = test_store();
        let first = store.create(&food("2024-03-01", 1.0)).unwrap().id;
        let second = store.create(&food("2024-01-01", 2.0)).unwrap().id;
        assert_ne!(first, second);

        let ids: Vec<_> = store.list_all().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_list_in_range_is_inclusive_and_date_ordered() {
        let (_dir, store) = test_store();
        store.create(&food("2024-01-03", 3.0)).unwrap();
        store.create(&food("2024-01-01", 1.0)).unwrap();
        store.create(&food("2024-01-05", 5.0)).unwrap();
        store.create(&food("2024-01-02", 2.0)).unwrap();

        let rows = store.list_in_range("2024-01-01", "2024-01-03").unwrap();
        let dates: Vec<_> = rows.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
    }

    #[test]
    fn test_list_in_range_compares_text() {
        let (_dir, store) = test_store();
        // Not ISO-8601: "1/15/2024" sorts before "2024-..." as text.
        store.create(&food("1/15/2024", 1.0)).unwrap();

        assert!(store.list_in_range("2024-01-01", "2024-12-31").unwrap().is_empty());
    }

    #[test]
    fn test_update_existing() {
        let (_dir, store) = test_store();
        let id = store.create(&food("2024-01-01", 10.0)).unwrap().id;

        let replacement = ExpenseDraft::new("2024-02-02", 20.0, "travel").with_note("taxi");
        let outcome = store.update(id, &replacement).unwrap();
        assert_eq!(outcome, MutationOutcome::success(id));

        let rows = store.list_all().unwrap();
        assert_eq!(rows[0].id, id);
        assert_eq!(rows[0].date, "2024-02-02");
        assert_eq!(rows[0].amount, 20.0);
        assert_eq!(rows[0].category, "travel");
        assert_eq!(rows[0].subcategory, "");
        assert_eq!(rows[0].note, "taxi");
    }

    #[test]
    fn test_update_missing_leaves_store_unchanged() {
        let (_dir, store) = test_store();
        store.create(&food("2024-01-01", 10.0)).unwrap();
        let before = store.list_all().unwrap();

        let outcome = store.update(999, &food("2030-01-01", 1.0)).unwrap();
        assert_eq!(outcome, MutationOutcome::not_found(999));
        assert_eq!(store.list_all().unwrap(), before);
    }

    #[test]
    fn test_delete_then_delete_again() {
        let (_dir, store) = test_store();
        let keep = store.create(&food("2024-01-01", 1.0)).unwrap().id;
        let gone = store.create(&food("2024-01-02", 2.0)).unwrap().id;

        assert!(store.delete(gone).unwrap().is_success());
        let ids: Vec<_> = store.list_all().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![keep]);

        assert_eq!(store.delete(gone).unwrap(), MutationOutcome::not_found(gone));
    }

    #[test]
    fn test_summarize_groups_by_category() {
        let (_dir, store) = test_store();
        store.create(&food("2024-01-01", 10.0)).unwrap();
        store.create(&food("2024-01-02", 5.0)).unwrap();

        let totals = store.summarize("2024-01-01", "2024-01-02", None).unwrap();
        assert_eq!(
            totals,
            vec![CategoryTotal {
                category: "food".to_string(),
                total_amount: 15.0,
            }]
        );
    }

    #[test]
    fn test_summarize_respects_range_and_filter() {
        let (_dir, store) = test_store();
        store.create(&food("2024-01-01", 10.0)).unwrap();
        store.create(&ExpenseDraft::new("2024-01-02", 7.0, "travel")).unwrap();
        store.create(&ExpenseDraft::new("2024-01-03", 3.0, "travel")).unwrap();
        store.create(&food("2024-02-01", 100.0)).unwrap();

        let all = store.summarize("2024-01-01", "2024-01-31", None).unwrap();
        let pairs: Vec<_> = all
            .iter()
            .map(|t| (t.category.as_str(), t.total_amount))
            .collect();
        assert_eq!(pairs, vec![("food", 10.0), ("travel", 10.0)]);

        let travel = store
            .summarize("2024-01-01", "2024-01-31", Some("travel"))
            .unwrap();
        assert_eq!(travel.len(), 1);
        assert_eq!(travel[0].total_amount, 10.0);

        assert!(store
            .summarize("2024-01-01", "2024-01-31", Some("rent"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unavailable_path() {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("missing").join("expenses.db"));

        let err = store.list_all().unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));
    }
}
