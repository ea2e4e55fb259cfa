#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

pub fn analysis_fixture() -> &'static str {
    return r#"
# Slow query report

Two queries account for most of the time spent in the uploaded logs.

## Missing index

The `orders` lookup scans the whole table on every call.

```sql
SELECT * FROM orders WHERE customer_id = $1;
```

Adding an index should bring it well under 10ms:

```sql
CREATE INDEX CONCURRENTLY idx_orders_customer_id ON orders (customer_id);
```

## Large sort

```
Sort  (cost=12345.67..12500.00 rows=250000 width=64)
```

Consider paginating with a keyset instead of OFFSET.
"#
    .trim();
}

pub fn chat_response_fixture() -> &'static str {
    return r#"{
  "message": "Query X is slow",
  "chat_history": [
    { "role": "user", "content": "show slow queries" },
    { "role": "assistant", "content": "Query X is slow" }
  ]
}"#;
}
