//! # Render Module
//!
//! Produces the source text of a model file. Rendering holds no schema
//! logic: it only lays out an assembled [`Table`].

use crate::model::Table;

/// Turns an assembled table into the text of its model file.
pub trait Render {
    fn render(&self, table: &Table, db_name: &str) -> String;
}

const MODEL_TEMPLATE: &str = r#"package models

import (
	"github.com/astaxie/beego/orm"
)

{{modelStruct}}
func init() {
	orm.RegisterModel(new({{modelName}}))
}
"#;

const MODEL_PREFIX_TEMPLATE: &str = r#"package models

import (
	"github.com/astaxie/beego/orm"
)

{{modelStruct}}
func init() {
	orm.RegisterModelWithPrefix("{{dbPrefix}}", new({{modelName}}))
}
"#;

/// Renders Go source registering the model with the Beego ORM.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeegoRenderer;

impl Render for BeegoRenderer {
    fn render(&self, table: &Table, db_name: &str) -> String {
        let template = if table.prefixed { MODEL_PREFIX_TEMPLATE } else { MODEL_TEMPLATE };

        template
            .replacen("{{modelStruct}}", &table.to_string(), 1)
            .replace("{{modelName}}", &table.type_name())
            .replace("{{dbPrefix}}", &format!("{db_name}_"))
    }
}
