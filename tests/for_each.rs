#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rowbind::{Entity, Error, ErrorKind, Mapper, Value, error_kind, is_kind};
    use rowbind_memory::{MemoryExecutor, ResultSet, init_logs};

    #[derive(Entity, Default, Debug, PartialEq, Clone)]
    struct Event {
        seq: u64,
        kind: String,
        payload: Option<Vec<u8>>,
    }

    const SELECT_EVENTS: &str = indoc! {"
        SELECT seq, kind, payload
        FROM events
        WHERE stream = ?
        ORDER BY seq
    "};

    fn events(count: u64) -> ResultSet {
        (1..=count).fold(ResultSet::new(["seq", "kind", "payload"]), |result, seq| {
            result.row([
                Value::UInt64(Some(seq)),
                Value::Varchar(Some(if seq % 3 == 0 { "reject" } else { "accept" }.into())),
                Value::Blob(Some(seq.to_be_bytes().into())),
            ])
        })
    }

    #[tokio::test]
    async fn indexed_callback_sees_every_row() {
        init_logs();
        let mut executor = MemoryExecutor::new();
        executor.with_rows(SELECT_EVENTS, events(4));
        let mut seen = Vec::new();
        let mut result = vec![Event::default(); 10];
        executor
            .for_each_indexed(
                SELECT_EVENTS,
                &["orders".into()],
                &mut result,
                |events, i| {
                    assert_eq!(events.len(), i + 1);
                    seen.push((i, events[i].seq));
                    Ok(())
                },
            )
            .await
            .unwrap();
        assert_eq!(seen, [(0, 1), (1, 2), (2, 3), (3, 4)]);
        assert_eq!(result.len(), 4);
        assert_eq!(result[3].payload.as_deref(), Some(&4u64.to_be_bytes()[..]));
        assert_eq!(executor.cursors_closed(), 1);
    }

    #[tokio::test]
    async fn indexed_callback_failure_stops() {
        init_logs();
        let mut executor = MemoryExecutor::new();
        executor.with_rows(SELECT_EVENTS, events(8));
        let mut result = Vec::<Box<Event>>::new();
        let error = executor
            .for_each_indexed(SELECT_EVENTS, &[], &mut result, |events, i| {
                if events[i].kind == "reject" {
                    return Err(Error::msg(format!("Event {} rejected", events[i].seq)));
                }
                Ok(())
            })
            .await
            .unwrap_err();
        assert_eq!(error_kind(&error), Some(ErrorKind::Callback));
        assert!(format!("{error:#}").contains("Event 3 rejected"));
        assert_eq!(result.len(), 3, "Rows up to the failing one are kept");
        assert_eq!(executor.rows_fetched(), 3);
        assert_eq!(executor.cursors_closed(), 1);
    }

    #[tokio::test]
    async fn indexed_zero_rows_keeps_destination() {
        init_logs();
        let mut executor = MemoryExecutor::new();
        executor.with_rows(SELECT_EVENTS, events(0));
        let mut result = vec![Event::default()];
        let mut calls = 0;
        executor
            .for_each_indexed(SELECT_EVENTS, &[], &mut result, |_, _| {
                calls += 1;
                Ok(())
            })
            .await
            .unwrap();
        assert_eq!(calls, 0);
        assert_eq!(result, [Event::default()]);
    }

    #[tokio::test]
    async fn indexed_requires_a_slice() {
        init_logs();
        let mut executor = MemoryExecutor::new();
        executor.with_rows(SELECT_EVENTS, events(2));
        let mut single = Event::default();
        let error = executor
            .for_each_indexed(SELECT_EVENTS, &[], &mut single, |_, _| Ok(()))
            .await
            .unwrap_err();
        assert!(is_kind(&error, ErrorKind::Shape));
        assert_eq!(executor.queries(), 0);
    }

    #[tokio::test]
    async fn indexed_fetch_failure_keeps_appended_rows() {
        init_logs();
        let mut executor = MemoryExecutor::new();
        executor.with_rows(SELECT_EVENTS, events(5).fail_at(2, "Connection reset"));
        let mut result = vec![Event::default(); 7];
        let mut calls = 0;
        let error = executor
            .for_each_indexed(SELECT_EVENTS, &[], &mut result, |_, _| {
                calls += 1;
                Ok(())
            })
            .await
            .unwrap_err();
        assert_eq!(error_kind(&error), None);
        assert!(format!("{error:#}").contains("Connection reset"));
        assert_eq!(calls, 2);
        assert_eq!(
            result.iter().map(|v| v.seq).collect::<Vec<_>>(),
            [1, 2],
            "The destination holds the rows appended before the failure"
        );
        assert_eq!(executor.cursors_closed(), 1);
    }

    #[tokio::test]
    async fn indexed_scan_failure_keeps_appended_rows() {
        init_logs();
        let mut executor = MemoryExecutor::new();
        executor.with_rows(
            SELECT_EVENTS,
            events(2).row([
                Value::Varchar(Some("third".into())),
                Value::Varchar(Some("accept".into())),
                Value::Null,
            ]),
        );
        let mut result = Vec::<Event>::new();
        let error = executor
            .for_each_indexed(SELECT_EVENTS, &[], &mut result, |_, _| Ok(()))
            .await
            .unwrap_err();
        assert_eq!(error_kind(&error), None);
        assert!(format!("{error:#}").contains("seq"));
        assert_eq!(result.len(), 2);
        assert_eq!(executor.cursors_closed(), 1);
    }

    #[tokio::test]
    async fn model_callback_by_value() {
        init_logs();
        let mut executor = MemoryExecutor::new();
        executor.with_rows(SELECT_EVENTS, events(5));
        let mut accepted = Vec::new();
        executor
            .for_each_model::<Event, _>(SELECT_EVENTS, &[], |event| {
                if event.kind == "accept" {
                    accepted.push(event);
                }
                Ok(())
            })
            .await
            .unwrap();
        assert_eq!(
            accepted.iter().map(|v| v.seq).collect::<Vec<_>>(),
            [1, 2, 4, 5]
        );
        assert_eq!(executor.cursors_closed(), 1);
    }

    #[tokio::test]
    async fn model_callback_failure() {
        init_logs();
        let mut executor = MemoryExecutor::new();
        executor.with_rows(SELECT_EVENTS, events(5));
        let mut calls = 0;
        let error = executor
            .for_each_model::<Event, _>(SELECT_EVENTS, &[], |event| {
                calls += 1;
                if event.seq == 2 {
                    return Err(Error::msg("Stop at the second event"));
                }
                Ok(())
            })
            .await
            .unwrap_err();
        assert!(is_kind(&error, ErrorKind::Callback));
        assert_eq!(calls, 2);
        assert_eq!(executor.cursors_closed(), 1);
    }

    #[tokio::test]
    async fn model_scan_and_fetch_failures() {
        init_logs();
        let mut executor = MemoryExecutor::new();
        executor.with_rows(
            SELECT_EVENTS,
            events(1).row([
                Value::Varchar(Some("second".into())),
                Value::Varchar(Some("accept".into())),
                Value::Null,
            ]),
        );
        let mut seen = Vec::new();
        let error = executor
            .for_each_model::<Event, _>(SELECT_EVENTS, &[], |event| {
                seen.push(event.seq);
                Ok(())
            })
            .await
            .unwrap_err();
        assert_eq!(error_kind(&error), None);
        assert_eq!(seen, [1]);
        assert_eq!(executor.cursors_closed(), 1);

        executor.with_rows(SELECT_EVENTS, events(4).fail_at(3, "Server gone away"));
        let mut seen = Vec::new();
        let error = executor
            .for_each_model::<Event, _>(SELECT_EVENTS, &[], |event| {
                seen.push(event.seq);
                Ok(())
            })
            .await
            .unwrap_err();
        assert_eq!(error_kind(&error), None);
        assert!(format!("{error:#}").contains("Server gone away"));
        assert_eq!(seen, [1, 2, 3]);
        assert_eq!(executor.cursors_closed(), 2);
    }

    #[tokio::test]
    async fn model_rejects_slices_and_boxes() {
        init_logs();
        let mut executor = MemoryExecutor::new();
        executor.with_rows(SELECT_EVENTS, events(2));
        let error = executor
            .for_each_model::<Vec<Event>, _>(SELECT_EVENTS, &[], |_| Ok(()))
            .await
            .unwrap_err();
        assert!(is_kind(&error, ErrorKind::Shape));
        let error = executor
            .for_each_model::<Box<Event>, _>(SELECT_EVENTS, &[], |_| Ok(()))
            .await
            .unwrap_err();
        assert!(is_kind(&error, ErrorKind::Shape));
        let error = executor
            .for_each_model::<Vec<Box<Event>>, _>(SELECT_EVENTS, &[], |_| Ok(()))
            .await
            .unwrap_err();
        assert!(is_kind(&error, ErrorKind::Shape));
        assert_eq!(executor.queries(), 0, "The query is never issued");
    }

    #[tokio::test]
    async fn model_of_scalars() {
        init_logs();
        let mut executor = MemoryExecutor::new();
        executor.with_rows(SELECT_EVENTS, events(3));
        let mut total = 0;
        executor
            .for_each_model::<u64, _>(SELECT_EVENTS, &[], |seq| {
                total += seq;
                Ok(())
            })
            .await
            .unwrap();
        assert_eq!(total, 6);
    }
}
