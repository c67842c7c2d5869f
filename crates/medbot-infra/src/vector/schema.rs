//! Arrow schema for the document chunk table.
//!
//! Arrow versions MUST match lancedb's transitive dependency (57.3 for lancedb 0.26).

use std::sync::Arc;

use arrow_schema::{DataType, Field, Schema};

/// BGESmallENV15 embedding dimension.
pub const EMBEDDING_DIMENSION: i32 = 384;

/// One row per chunk of a reference document.
pub fn document_chunks_schema() -> Schema {
    Schema::new(vec![
        Field::new("chunk_id", DataType::Utf8, false),
        Field::new("source", DataType::Utf8, false),
        Field::new("chunk_index", DataType::Int32, false),
        Field::new("chunk_text", DataType::Utf8, false),
        Field::new("embedding_model", DataType::Utf8, false),
        Field::new("vector", vector_type(), false),
    ])
}

/// Fixed-size list of float32 values holding one embedding.
pub fn vector_type() -> DataType {
    DataType::FixedSizeList(
        Arc::new(Field::new("item", DataType::Float32, true)),
        EMBEDDING_DIMENSION,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_chunks_schema_fields() {
        let schema = document_chunks_schema();
        assert_eq!(schema.fields().len(), 6);
        assert!(schema.field_with_name("chunk_text").is_ok());
        assert!(schema.field_with_name("source").is_ok());

        let vector_field = schema.field_with_name("vector").unwrap();
        match vector_field.data_type() {
            DataType::FixedSizeList(_, size) => assert_eq!(*size, EMBEDDING_DIMENSION),
            other => panic!("Expected FixedSizeList, got {:?}", other),
        }
    }
}
