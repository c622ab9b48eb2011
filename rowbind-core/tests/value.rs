#[cfg(test)]
mod tests {
    use rowbind_core::{AsValue, Value};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use time::{
        Date, OffsetDateTime, PrimitiveDateTime, Time,
        macros::{date, datetime, time},
    };
    use uuid::Uuid;

    #[test]
    fn value_null() {
        assert!(Value::Null.is_null());
        assert!(Value::Int32(None).is_null());
        assert!(Value::Varchar(None).is_null());
        assert!(!Value::Varchar(Some("".into())).is_null());
        assert!(i32::try_from_value(Value::Null).is_err());
        assert!(String::try_from_value(Value::Varchar(None)).is_err());
        assert_eq!(Value::from(None::<i64>), Value::Int64(None));
    }

    #[test]
    fn value_bool() {
        let val: Value = true.into();
        assert_eq!(val, Value::Boolean(Some(true)));
        assert_ne!(val, Value::Boolean(None));
        let var: bool = AsValue::try_from_value(val).unwrap();
        assert!(var);
        assert!(bool::try_from_value(1_i8.as_value()).unwrap());
        assert!(!bool::try_from_value(0_u64.as_value()).unwrap());
        assert!(bool::try_from_value(2_u128.as_value()).unwrap());
        assert!(bool::try_from_value(0.5_f32.as_value()).is_err());
        assert!(bool::try_from_value(Value::Varchar(Some("t".into()))).unwrap());
        assert!(!bool::parse("FALSE").unwrap());
        assert!(bool::parse("1").unwrap());
        assert!(bool::parse("false more").is_err());
        assert!(bool::parse("").is_err());
    }

    #[test]
    fn value_integers() {
        assert_eq!(42_i32.as_value(), Value::Int32(Some(42)));
        assert_eq!(7_isize.as_value(), Value::Int64(Some(7)));
        assert_eq!(7_usize.as_value(), Value::UInt64(Some(7)));
        assert_eq!(i64::try_from_value(Value::Int8(Some(-3))).unwrap(), -3);
        assert_eq!(u8::try_from_value(Value::Int64(Some(255))).unwrap(), 255);
        assert!(u8::try_from_value(Value::Int64(Some(256))).is_err());
        assert!(u32::try_from_value(Value::Int16(Some(-1))).is_err());
        assert_eq!(
            i128::try_from_value(Value::UInt64(Some(u64::MAX))).unwrap(),
            u64::MAX as i128
        );
        assert_eq!(
            i16::try_from_value(Value::Decimal(Some(Decimal::from(300)))).unwrap(),
            300
        );
        assert!(i16::try_from_value(Value::Decimal(Some(Decimal::new(15, 1)))).is_err());
        assert_eq!(
            i64::try_from_value(Value::Unknown(Some(" 9001 ".into()))).unwrap(),
            9001
        );
        assert!(i64::try_from_value(Value::Varchar(Some("abc".into()))).is_err());
        assert!(i32::try_from_value(Value::Float64(Some(1.0))).is_err());
        assert!(u16::try_from_value(Value::Boolean(Some(true))).is_err());
    }

    #[test]
    fn value_floats() {
        assert_eq!(1.5_f32.as_value(), Value::Float32(Some(1.5)));
        assert_eq!(f64::try_from_value(Value::Float32(Some(0.25))).unwrap(), 0.25);
        assert_eq!(f32::try_from_value(Value::Int32(Some(-8))).unwrap(), -8.0);
        assert_eq!(
            f64::try_from_value(Value::Decimal(Some(Decimal::new(25, 1)))).unwrap(),
            2.5
        );
        assert_eq!(f64::parse("2.5e3").unwrap(), 2500.0);
        assert!(f64::try_from_value(Value::Varchar(Some("12,5".into()))).is_err());
        assert!(f32::try_from_value(Value::Date(Some(date!(2024 - 01 - 01)))).is_err());
    }

    #[test]
    fn value_decimal() {
        let var = Decimal::from_str("-17.250").unwrap();
        assert_eq!(var.as_value(), Value::Decimal(Some(var)));
        assert_eq!(
            Decimal::try_from_value(Value::Int64(Some(12))).unwrap(),
            Decimal::from(12)
        );
        assert_eq!(
            Decimal::try_from_value(Value::Float64(Some(0.5))).unwrap(),
            Decimal::new(5, 1)
        );
        assert_eq!(
            Decimal::try_from_value(Value::Varchar(Some("3.14159".into()))).unwrap(),
            Decimal::from_str("3.14159").unwrap()
        );
        assert!(Decimal::try_from_value(Value::Float64(Some(f64::NAN))).is_err());
        assert!(Decimal::try_from_value(Value::Boolean(Some(false))).is_err());
    }

    #[test]
    fn value_string() {
        assert_eq!(
            String::from("hello").as_value(),
            Value::Varchar(Some("hello".into()))
        );
        assert_eq!(Value::from("hi"), Value::Varchar(Some("hi".into())));
        assert_eq!(
            String::try_from_value(Value::Unknown(Some("raw".into()))).unwrap(),
            "raw"
        );
        assert_eq!(
            String::try_from_value(Value::Blob(Some(b"bytes".to_vec().into()))).unwrap(),
            "bytes"
        );
        assert!(String::try_from_value(Value::Blob(Some(Box::new([0xff, 0xfe])))).is_err());
        assert_eq!(String::try_from_value(Value::Int32(Some(-5))).unwrap(), "-5");
        assert_eq!(
            String::try_from_value(Value::Uuid(Some(Uuid::nil()))).unwrap(),
            "00000000-0000-0000-0000-000000000000"
        );
        assert!(String::try_from_value(Value::Date(Some(date!(2024 - 01 - 01)))).is_err());
    }

    #[test]
    fn value_blob() {
        let val = vec![1_u8, 2, 3].as_value();
        assert_eq!(val, Value::Blob(Some(Box::new([1, 2, 3]))));
        assert_eq!(Vec::<u8>::try_from_value(val.clone()).unwrap(), [1, 2, 3]);
        assert_eq!(&*Box::<[u8]>::try_from_value(val).unwrap(), [1, 2, 3]);
        assert_eq!(
            Vec::<u8>::try_from_value(Value::Varchar(Some("ab".into()))).unwrap(),
            b"ab"
        );
        assert!(Vec::<u8>::try_from_value(Value::Int8(Some(1))).is_err());
        assert_eq!(
            Value::Blob(Some(Box::new([0xca, 0xfe]))).to_string(),
            "x'cafe'"
        );
    }

    #[test]
    fn value_uuid() {
        let text = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        let var = Uuid::from_str(text).unwrap();
        assert_eq!(Uuid::try_from_value(Value::Varchar(Some(text.into()))).unwrap(), var);
        assert_eq!(
            Uuid::try_from_value(Value::Blob(Some(var.as_bytes().to_vec().into()))).unwrap(),
            var
        );
        assert!(Uuid::try_from_value(Value::Blob(Some(Box::new([1, 2])))).is_err());
        assert!(<Uuid as AsValue>::parse("not-a-uuid").is_err());
    }

    #[test]
    fn value_date() {
        let var = date!(2025 - 07 - 14);
        assert_eq!(var.as_value(), Value::Date(Some(var)));
        assert_eq!(<Date as AsValue>::parse("2025-07-14").unwrap(), var);
        assert_eq!(
            Date::try_from_value(Value::Timestamp(Some(datetime!(2025-07-14 23:59:59)))).unwrap(),
            var
        );
        assert!(<Date as AsValue>::parse("14/07/2025").is_err());
        assert!(Date::try_from_value(Value::Time(Some(time!(10:00)))).is_err());
    }

    #[test]
    fn value_time() {
        assert_eq!(<Time as AsValue>::parse("08:15:30").unwrap(), time!(08:15:30));
        assert_eq!(<Time as AsValue>::parse("08:15").unwrap(), time!(08:15));
        assert_eq!(<Time as AsValue>::parse("08:15:30.25").unwrap(), time!(08:15:30.25));
        assert!(<Time as AsValue>::parse("25:00").is_err());
    }

    #[test]
    fn value_timestamps() {
        let naive = datetime!(2024-12-31 18:00:00);
        assert_eq!(
            <PrimitiveDateTime as AsValue>::parse("2024-12-31 18:00:00").unwrap(),
            naive
        );
        assert_eq!(
            <PrimitiveDateTime as AsValue>::parse("2024-12-31T18:00:00").unwrap(),
            naive
        );
        assert_eq!(
            PrimitiveDateTime::try_from_value(Value::Date(Some(date!(2024 - 12 - 31)))).unwrap(),
            datetime!(2024-12-31 00:00:00)
        );
        assert!(
            PrimitiveDateTime::try_from_value(Value::TimestampWithTimezone(Some(
                naive.assume_utc()
            )))
            .is_err()
        );
        assert_eq!(
            <OffsetDateTime as AsValue>::parse("2024-12-31T18:00:00+02:00").unwrap(),
            datetime!(2024-12-31 18:00:00 +02:00)
        );
        assert_eq!(
            <OffsetDateTime as AsValue>::parse("2024-12-31 18:00:00.5+02:00").unwrap(),
            datetime!(2024-12-31 18:00:00.5 +02:00)
        );
        assert_eq!(
            <OffsetDateTime as AsValue>::parse("2024-12-31 18:00:00-05").unwrap(),
            datetime!(2024-12-31 18:00:00 -05:00)
        );
        assert_eq!(
            OffsetDateTime::try_from_value(Value::Timestamp(Some(naive))).unwrap(),
            naive.assume_utc()
        );
    }
}
