//! Tests for the ClickHouse SQL builder

use super::*;
use crate::model::{Collation, Index, Logged};

const URL: &str = "jdbc:clickhouse://clickhouse:8123/analytics";

fn builder() -> ClickHouseSqlBuilder {
    ClickHouseSqlBuilder::new(URL).unwrap()
}

fn table_a() -> Table {
    Table::new(
        "immunization",
        vec![
            Column::not_null("id", DataType::BigInt),
            Column::not_null("data", DataType::Character(11)),
            Column::not_null("period", DataType::Varchar(50)),
            Column::new("created", DataType::Timestamp),
            Column::new("user", DataType::Jsonb),
            Column::new("value", DataType::Double),
        ],
    )
    .with_primary_key(["id"])
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn test_database_name_from_url() {
    assert_eq!(builder().database_name(), Some("analytics"));

    let b = ClickHouseSqlBuilder::new("jdbc:clickhouse://localhost:8123/dhis2?ssl=true").unwrap();
    assert_eq!(b.database_name(), Some("dhis2"));

    let b = ClickHouseSqlBuilder::new("jdbc:clickhouse://localhost:8123/").unwrap();
    assert_eq!(b.database_name(), None);
}

#[test]
fn test_invalid_url_rejected() {
    for url in ["", "   ", "jdbc:postgresql://localhost/dhis2", "clickhouse:8123/db"] {
        assert!(
            matches!(
                ClickHouseSqlBuilder::new(url),
                Err(SqlError::InvalidConnectionUrl(_))
            ),
            "{url:?}"
        );
    }
}

#[test]
fn test_blank_named_collection_rejected() {
    assert!(matches!(
        ClickHouseSqlBuilder::with_named_collection(URL, " "),
        Err(SqlError::InvalidArgument(_))
    ));
}

// ============================================================================
// DATA TYPES AND CAPABILITIES
// ============================================================================

#[test]
fn test_data_types() {
    let b = builder();
    assert_eq!(b.data_type_small_int(), "Int16");
    assert_eq!(b.data_type_integer(), "Int32");
    assert_eq!(b.data_type_big_int(), "Int64");
    assert_eq!(b.data_type_decimal(), "Decimal(18,6)");
    assert_eq!(b.data_type_float(), "Float32");
    assert_eq!(b.data_type_double(), "Float64");
    assert_eq!(b.data_type_boolean(), "Bool");
    assert_eq!(b.data_type_character(11), "String");
    assert_eq!(b.data_type_varchar(255), "String");
    assert_eq!(b.data_type_text(), "String");
    assert_eq!(b.data_type_date(), "Date");
    assert_eq!(b.data_type_timestamp(), "DateTime64(3)");
    assert_eq!(b.data_type_timestamp_tz(), "DateTime64(3, 'UTC')");
    assert_eq!(b.data_type_geometry(), "String");
    assert_eq!(b.data_type_geometry_point(), "Point");
    assert_eq!(b.data_type_json(), "JSON");
}

#[test]
fn test_index_types_unsupported() {
    let b = builder();
    assert!(b.index_type_btree().unwrap_err().is_unsupported());
    assert!(b.index_type_gist().unwrap_err().is_unsupported());
    assert!(b.index_type_gin().unwrap_err().is_unsupported());
}

#[test]
fn test_capabilities() {
    let b = builder();
    assert!(!b.supports_analyze());
    assert!(!b.supports_vacuum());
    assert!(!b.supports_indexes());
    assert!(!b.supports_inheritance());
    assert!(!b.supports_declarative_partitioning());
    assert!(!b.supports_geospatial_data());
    assert!(!b.supports_correlated_subquery());
    assert!(!b.supports_multi_statements());
}

// ============================================================================
// QUOTING AND ESCAPING
// ============================================================================

#[test]
fn test_quote() {
    let b = builder();
    assert_eq!(
        b.quote("Treated \"malaria\" at facility"),
        "\"Treated \"\"malaria\"\" at facility\""
    );
    assert_eq!(b.quote_ax("value"), "ax.\"value\"");
    assert_eq!(b.unquote("\"dx\""), "dx");
}

#[test]
fn test_escape_doubles_backslashes() {
    let b = builder();
    assert_eq!(b.escape("Men's health"), "Men''s health");
    assert_eq!(b.escape("C:\\path"), "C:\\\\path");
    assert_eq!(b.single_quote("a\\'b"), "'a\\\\''b'");
}

// ============================================================================
// DDL
// ============================================================================

#[test]
fn test_create_table() {
    let expected = "create table \"immunization\" (\"id\" Int64, \"data\" String, \
        \"period\" String, \"created\" Nullable(DateTime64(3)), \"user\" JSON, \
        \"value\" Nullable(Float64)) engine = MergeTree() order by (\"id\");";
    assert_eq!(builder().create_table(&table_a()), expected);
}

#[test]
fn test_create_table_orders_by_sort_key() {
    let table = Table::new(
        "events",
        vec![
            Column::not_null("uid", DataType::Character(11)),
            Column::not_null("occurred", DataType::Date),
        ],
    )
    .with_sort_key(["occurred", "uid"]);

    assert_eq!(
        builder().create_table(&table),
        "create table \"events\" (\"uid\" String, \"occurred\" Date) \
         engine = MergeTree() order by (\"occurred\", \"uid\");"
    );
}

#[test]
fn test_create_table_orders_by_first_column() {
    let table = Table::new("events", vec![Column::not_null("uid", DataType::Text)]);
    assert_eq!(
        builder().create_table(&table),
        "create table \"events\" (\"uid\" String) engine = MergeTree() order by (\"uid\");"
    );
}

#[test]
fn test_create_table_without_columns() {
    let table = Table::new("empty", Vec::new());
    assert_eq!(
        builder().create_table(&table),
        "create table \"empty\" () engine = MergeTree() order by tuple();"
    );
}

#[test]
fn test_create_table_ignores_postgres_only_clauses() {
    let parent = Table::new("parent", vec![Column::new("id", DataType::Integer)]);
    let table = Table::new(
        "child",
        vec![Column::not_null("code", DataType::Varchar(50)).with_collation(Collation::C)],
    )
    .with_checks(["\"code\" <> ''"])
    .with_logged(Logged::Unlogged)
    .with_parent(parent);

    assert_eq!(
        builder().create_table(&table),
        "create table \"child\" (\"code\" String) engine = MergeTree() order by (\"code\");"
    );
}

#[test]
fn test_rename_table() {
    assert_eq!(
        builder().rename_table(&table_a(), "vaccination"),
        "rename table \"immunization\" to \"vaccination\";"
    );
}

#[test]
fn test_drop_table() {
    let b = builder();
    assert_eq!(
        b.drop_table_if_exists("immunization"),
        "drop table if exists \"immunization\";"
    );
    assert_eq!(
        b.drop_table_if_exists_cascade("immunization"),
        b.drop_table_if_exists("immunization")
    );
}

#[test]
fn test_swap_table() {
    assert_eq!(
        builder().swap_table(&table_a(), "vaccination"),
        "drop table if exists \"vaccination\"; \
         rename table \"immunization\" to \"vaccination\";"
    );
}

#[test]
fn test_unsupported_statements() {
    let b = builder();
    let index = Index::new("index_a", "immunization", ["id"]);

    assert!(b.set_parent_table(&table_a(), "p").unwrap_err().is_unsupported());
    assert!(b.remove_parent_table(&table_a(), "p").unwrap_err().is_unsupported());
    assert!(b.swap_parent_table(&table_a(), "p", "q").unwrap_err().is_unsupported());
    assert!(b.create_index(&index).unwrap_err().is_unsupported());
    assert!(b.analyze_table("immunization").unwrap_err().is_unsupported());
    assert!(b.vacuum_table("immunization").unwrap_err().is_unsupported());
}

#[test]
fn test_table_exists() {
    assert_eq!(
        builder().table_exists("immunization"),
        "select t.name as table_name from system.tables t \
         where t.database = 'analytics' and t.name = 'immunization' \
         and t.engine not in ('View', 'MaterializedView', 'LiveView');"
    );
}

#[test]
fn test_table_exists_without_database() {
    let b = ClickHouseSqlBuilder::new("jdbc:clickhouse://localhost:8123").unwrap();
    assert_eq!(
        b.table_exists("immunization"),
        "select t.name as table_name from system.tables t \
         where t.database = currentDatabase() and t.name = 'immunization' \
         and t.engine not in ('View', 'MaterializedView', 'LiveView');"
    );
}

#[test]
fn test_count_rows() {
    assert_eq!(
        builder().count_rows(&table_a()),
        "select count(*) as row_count from \"immunization\";"
    );
}

#[test]
fn test_qualify_table() {
    assert_eq!(
        builder().qualify_table("category"),
        "postgresql(pg_dhis, table = 'category')"
    );

    let b = ClickHouseSqlBuilder::with_named_collection(URL, "source_db").unwrap();
    assert_eq!(
        b.qualify_table("organisationunit"),
        "postgresql(source_db, table = 'organisationunit')"
    );
}

// ============================================================================
// EXPRESSIONS
// ============================================================================

#[test]
fn test_cast() {
    assert_eq!(
        builder().cast("ax.\"value\"", DataType::Double),
        "cast(ax.\"value\" as Float64)"
    );
}

#[test]
fn test_conditionals() {
    let b = builder();
    assert_eq!(b.if_then("a > 0", "a"), "if(a > 0, a, null)");
    assert_eq!(b.if_then_else("a > 0", "a", "0"), "if(a > 0, a, 0)");
    assert_eq!(
        b.if_then_else_multi(&[("x = 1", "'one'"), ("x = 2", "'two'")], "'many'"),
        "multiIf(x = 1, 'one', x = 2, 'two', 'many')"
    );
}

#[test]
fn test_json_extract() {
    let b = builder();
    assert_eq!(
        b.json_extract("ev.eventdatavalues", "value"),
        "JSONExtractString(ev.eventdatavalues, 'value')"
    );
    assert_eq!(
        b.json_extract_nested("eventdatavalues", "qrur9Dvnyt5", "value"),
        "JSONExtractString(eventdatavalues, 'qrur9Dvnyt5', 'value')"
    );
}

#[test]
fn test_date_functions() {
    let b = builder();
    assert_eq!(b.date_trunc("month", "pe.startdate"), "date_trunc('month', pe.startdate)");
    assert_eq!(
        b.difference_in_seconds("a.completed", "a.created"),
        "dateDiff('second', a.created, a.completed)"
    );
}

#[test]
fn test_boolean_and_regexp() {
    let b = builder();
    assert_eq!(b.is_true("en", "deleted"), "en.\"deleted\" = true");
    assert_eq!(b.is_false("en", "deleted"), "en.\"deleted\" = false");
    assert_eq!(b.regexp_match("value", "'^[0-9]+$'"), "match(value, '^[0-9]+$')");
}

#[test]
fn test_statistics() {
    let b = builder();
    assert_eq!(b.log10("value"), "log10(value)");
    assert_eq!(b.stddev("value"), "stddevSamp(value)");
    assert_eq!(b.variance("value"), "varSamp(value)");
}

#[test]
fn test_aggr_decimal() {
    let b = builder();
    assert_eq!(
        b.aggr_decimal("AVG(value)", 10, 2),
        "AVG(cast((value) as Decimal(10,2)))"
    );
    assert_eq!(
        b.aggr_decimal("sum(distinct amount)", 15, 4),
        "SUM(DISTINCT cast((amount) as Decimal(15,4)))"
    );
    assert_eq!(b.aggr_decimal("COUNT(x)", 10, 2), "COUNT(x)");
}

// ============================================================================
// NAMED COLLECTIONS
// ============================================================================

#[test]
fn test_named_collection_federation_available() {
    let b = builder();
    assert!(b.as_catalog_federation().is_none());
    let federation = b.as_named_collection_federation().unwrap();
    assert_eq!(federation.named_collection(), "pg_dhis");
}

#[test]
fn test_create_named_collection() {
    let sql = builder()
        .create_named_collection(
            "pg_dhis",
            &[
                ("host", Value::from("localhost")),
                ("port", Value::from(5432)),
                ("password", Value::from("it's")),
            ],
        )
        .unwrap();
    assert_eq!(
        sql,
        "create named collection \"pg_dhis\" as host = 'localhost', port = 5432, \
         password = 'it''s';"
    );
}

#[test]
fn test_create_named_collection_requires_keys() {
    assert!(matches!(
        builder().create_named_collection("pg_dhis", &[]),
        Err(SqlError::InvalidArgument(_))
    ));
}

#[test]
fn test_create_postgres_named_collection() {
    let sql = builder()
        .create_postgres_named_collection("jdbc:postgresql://db.local/dhis2", "dhis", "secret")
        .unwrap();
    assert_eq!(
        sql,
        "create named collection \"pg_dhis\" as host = 'db.local', port = 5432, \
         username = 'dhis', password = 'secret', database = 'dhis2';"
    );
}

#[test]
fn test_create_postgres_named_collection_requires_database() {
    let result =
        builder().create_postgres_named_collection("jdbc:postgresql://db.local:5433/", "u", "p");
    assert!(matches!(result, Err(SqlError::InvalidConnectionUrl(_))));
}

#[test]
fn test_drop_named_collection() {
    assert_eq!(
        builder().drop_named_collection_if_exists("pg_dhis"),
        "drop named collection if exists \"pg_dhis\";"
    );
}
