use super::Compiler;
use crate::{
    error::{SchemaError, ValidationError},
    graph::Location,
    validator::NodeId,
};

/// Context holds the compiler and the location of the schema object being compiled.
pub(crate) struct CompilationContext<'c, 'g> {
    compiler: &'c mut Compiler<'g>,
    location: Location,
}

impl<'c, 'g> CompilationContext<'c, 'g> {
    pub(crate) fn new(compiler: &'c mut Compiler<'g>, location: Location) -> Self {
        CompilationContext { compiler, location }
    }

    /// Compile the schema stored under `keyword` of the current schema.
    pub(crate) fn subschema(&mut self, keyword: &str) -> Result<NodeId, SchemaError> {
        let location = self.location.join(keyword);
        self.compiler.compile_location(&location)
    }

    /// Compile the schema stored under `keyword`/`key`, e.g. an array item or a map member.
    pub(crate) fn subschema_at(&mut self, keyword: &str, key: &str) -> Result<NodeId, SchemaError> {
        let location = self.location.join(keyword).join(key);
        self.compiler.compile_location(&location)
    }

    /// Compile the `idx`-th schema of the array stored under `keyword`.
    pub(crate) fn subschema_item(&mut self, keyword: &str, idx: usize) -> Result<NodeId, SchemaError> {
        self.subschema_at(keyword, itoa::Buffer::new().format(idx))
    }

    /// Printable location of `keyword` inside the current schema.
    pub(crate) fn path(&self, keyword: &str) -> String {
        self.compiler
            .graph()
            .describe(&self.location.join(keyword))
    }

    pub(crate) fn invalid_keyword(&self, keyword: &str) -> SchemaError {
        SchemaError::schema_validation(vec![ValidationError::invalid_keyword(
            self.path(keyword),
            keyword,
        )])
    }

    pub(crate) fn invalid_pattern(
        &self,
        keyword: &str,
        pattern: &str,
        error: &regex::Error,
    ) -> SchemaError {
        SchemaError::schema_validation(vec![ValidationError::invalid_pattern(
            self.path(keyword),
            pattern,
            error,
        )])
    }
}
