#[cfg(test)]
mod tests {
    use rowbind_core::{Cursor, CursorGuard, Executor, Mapper, Value};
    use rowbind_memory::{MemoryExecutor, ResultSet};

    fn numbers() -> ResultSet {
        ResultSet::new(["n", "label"])
            .row([Value::Int64(Some(1)), Value::Varchar(Some("one".into()))])
            .row([Value::Int64(Some(2)), Value::Varchar(None)])
    }

    #[tokio::test]
    async fn serves_scripted_rows() {
        let mut executor = MemoryExecutor::new();
        executor.with_rows("SELECT n, label FROM numbers", numbers());
        let mut cursor = executor
            .query("  SELECT n, label FROM numbers\n", &[Value::Int32(Some(5))])
            .await
            .expect("Query is scripted");
        assert_eq!(&*cursor.columns().unwrap(), ["n", "label"]);
        let first = cursor.next().await.unwrap().expect("First row");
        assert_eq!(first[0], Value::Int64(Some(1)));
        assert!(cursor.next().await.unwrap().is_some());
        assert!(cursor.next().await.unwrap().is_none());
        cursor.close().unwrap();
        assert!(cursor.close().is_err());
        assert!(cursor.next().await.is_err());
        assert_eq!(executor.queries(), 1);
        assert_eq!(executor.rows_fetched(), 2);
        assert_eq!(executor.cursors_opened(), 1);
        assert_eq!(executor.cursors_closed(), 1);
        assert_eq!(executor.last_args(), Some(vec![Value::Int32(Some(5))]));
    }

    #[tokio::test]
    async fn scripted_failures() {
        let mut executor = MemoryExecutor::new();
        executor
            .with_query_failure("SELECT broken", "Syntax error")
            .with_columns_failure("SELECT lost", "Connection reset")
            .with_rows("SELECT half", numbers().fail_at(1, "Network timeout"));
        let error = executor.query("SELECT broken", &[]).await.err().unwrap();
        assert_eq!(error.to_string(), "Syntax error");
        assert!(executor.query("SELECT unknown", &[]).await.is_err());

        let cursor = executor.query("SELECT lost", &[]).await.unwrap();
        assert_eq!(cursor.columns().unwrap_err().to_string(), "Connection reset");

        let mut cursor = executor.query("SELECT half", &[]).await.unwrap();
        assert!(cursor.next().await.unwrap().is_some());
        assert_eq!(
            cursor.next().await.unwrap_err().to_string(),
            "Network timeout"
        );
        assert_eq!(executor.queries(), 4);
        assert_eq!(executor.cursors_opened(), 2);
    }

    #[tokio::test]
    async fn guard_closes_once() {
        let mut executor = MemoryExecutor::new();
        executor.with_rows("SELECT n, label FROM numbers", numbers());
        {
            let _cursor = CursorGuard::new(
                executor
                    .query("SELECT n, label FROM numbers", &[])
                    .await
                    .unwrap(),
            );
        }
        {
            let mut cursor = CursorGuard::new(
                executor
                    .query("SELECT n, label FROM numbers", &[])
                    .await
                    .unwrap(),
            );
            cursor.close().unwrap();
            assert!(cursor.is_closed());
        }
        assert_eq!(executor.cursors_opened(), 2);
        assert_eq!(executor.cursors_closed(), 2);
    }

    #[tokio::test]
    async fn query_row_and_exec() {
        let mut executor = MemoryExecutor::new();
        executor
            .with_rows("SELECT n, label FROM numbers", numbers())
            .with_affected("DELETE FROM numbers", 2);
        let row = executor
            .query_row("SELECT n, label FROM numbers", &[])
            .await
            .unwrap()
            .expect("There is a first row");
        assert_eq!(
            row.get_column("label"),
            Some(&Value::Varchar(Some("one".into())))
        );
        assert_eq!(executor.rows_fetched(), 1);
        assert_eq!(executor.cursors_closed(), 1);
        let affected = executor
            .exec("DELETE FROM numbers", &[Value::Null])
            .await
            .unwrap();
        assert_eq!(affected.rows_affected, 2);
        assert_eq!(executor.execs(), 1);
        assert_eq!(executor.last_args(), Some(vec![Value::Null]));
    }

    #[tokio::test]
    async fn maps_scalars() {
        let mut executor = MemoryExecutor::new();
        executor.with_rows("SELECT n, label FROM numbers", numbers());
        let mut values = Vec::<i64>::new();
        executor
            .map_all("SELECT n, label FROM numbers", &[], &mut values)
            .await
            .unwrap();
        assert_eq!(values, [1, 2]);
        let mut labels = Vec::<Option<String>>::new();
        executor
            .map_all("SELECT n, label FROM numbers", &[], &mut labels)
            .await
            .unwrap();
        assert_eq!(labels, [Some("1".to_string()), Some("2".to_string())]);
        assert_eq!(executor.cursors_opened(), executor.cursors_closed());
    }
}
