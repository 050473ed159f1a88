use sqlcraft_core::{Connection, Database, Result, Statement, Values};

// Rendering needs no live server; a no-op connection is enough here.
struct NoopConnection;

impl Connection for NoopConnection {
    async fn fetch_rows(&mut self, _sql: &str) -> Result<Vec<serde_json::Value>> {
        Ok(Vec::new())
    }

    async fn execute_returning_id(&mut self, _sql: &str) -> Result<u64> {
        Ok(0)
    }

    async fn execute_returning_affected(&mut self, _sql: &str) -> Result<u64> {
        Ok(0)
    }

    async fn execute(&mut self, _sql: &str) -> Result<()> {
        Ok(())
    }

    async fn close(self) -> Result<()> {
        Ok(())
    }
}

fn main() {
    let mut db = Database::new(NoopConnection);

    // SELECT with chained clauses
    let select_sql = db
        .select("users.id, users.name, COUNT(orders.id) AS order_count")
        .from("users")
        .left_join("orders", "orders.user_id = users.id")
        .where_("users.status = 'active'")
        .where_("users.age >= 18")
        .group_by("users.id")
        .order_by("order_count DESC")
        .limit("10")
        .sql()
        .unwrap();
    println!("SELECT SQL:\n{}", select_sql);

    // INSERT: text values are escaped, numbers stay bare
    let insert_sql = db
        .insert(
            "users",
            Values::new()
                .set("name", "O'Brien")
                .set("email", "obrien@example.com")
                .set("age", 30),
        )
        .sql()
        .unwrap();
    println!("INSERT SQL: {}", insert_sql);

    // UPDATE with a predicate list
    let update_sql = db
        .update(
            "users",
            Values::new().set("email", "new@example.com"),
            vec!["id = 123", "active = 1"],
        )
        .sql()
        .unwrap();
    println!("UPDATE SQL: {}", update_sql);

    // DELETE requires a table before rendering
    let delete_sql = db
        .delete()
        .from("users")
        .where_("last_login < '2020-01-01'")
        .sql()
        .unwrap();
    println!("DELETE SQL: {}", delete_sql);

    println!("statements built: {}", db.queries());
}
