//! Query translation from docgate expressions to MongoDB query syntax.
//!
//! This module translates the gateway's filter expressions and identifier candidates
//! into MongoDB BSON documents for execution by the MongoDB query engine.

use bson::{Document, Bson, doc};

use docgate_core::{
    query::{QueryVisitor, Expr, FieldOp, Sort, SortDirection},
    error::DocumentStoreError,
    identifier::ID_FIELD,
};


/// Translates docgate query expressions into MongoDB query documents.
///
/// This struct implements the [`QueryVisitor`] trait to convert abstract
/// query expressions into MongoDB's native BSON query syntax.
pub(crate) struct MongoQueryTranslator;

impl MongoQueryTranslator {
    /// Translates an optional filter; no filter matches every document.
    pub(crate) fn filter(expr: Option<&Expr>) -> Result<Document, DocumentStoreError> {
        match expr {
            Some(expr) => MongoQueryTranslator.visit_expr(expr),
            None => Ok(doc! {}),
        }
    }

    pub(crate) fn sort(sort: &Sort) -> Document {
        doc! {
            sort.field.clone(): match sort.direction {
                SortDirection::Asc => 1,
                SortDirection::Desc => -1,
            }
        }
    }

    /// Filter matching a document whose `_id` equals any of the candidates.
    pub(crate) fn id_filter(mut candidates: Vec<Bson>) -> Document {
        if candidates.len() == 1 {
            let only = candidates.remove(0);
            return doc! { ID_FIELD: only };
        }

        doc! { ID_FIELD: { "$in": candidates } }
    }
}

impl QueryVisitor for MongoQueryTranslator {
    type Output = Document;
    type Error = DocumentStoreError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            "$and": exprs
                .iter()
                .map(|expr| self.visit_expr(expr))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    fn visit_exists(&mut self, field: &str, should_exist: bool) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            field: { "$exists": should_exist },
        })
    }

    fn visit_field(&mut self, field: &str, op: &FieldOp, value: &Bson) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            field: match op {
                FieldOp::Eq => doc! { "$eq": value },
                FieldOp::In => match value {
                    Bson::Array(values) => doc! { "$in": values },
                    _ => return Err(DocumentStoreError::Backend("In operator requires an array value".to_string())),
                },
            }
        })
    }
}
