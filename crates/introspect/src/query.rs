//! The introspection query document.

/// How many `ofType` levels the `TypeRef` fragment unwraps.
///
/// Seven levels covers wrappers up to `[[[T!]!]!]!` which is deeper than
/// anything seen in practice.
const TYPE_REF_DEPTH: usize = 7;

/// Optional parts of the introspection query.
///
/// The defaults ask for what every GraphQL server understands: descriptions
/// on, everything newer off. Servers reject queries that select fields they
/// do not know about, so only enable the extras for servers that support
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct IntrospectionOptions {
    /// Select `description` on types, fields, arguments and enum values.
    pub descriptions: bool,
    /// Select `specifiedByURL` on scalars.
    pub specified_by_url: bool,
    /// Select `isRepeatable` on directives.
    pub directive_is_repeatable: bool,
    /// Select `description` on `__schema`.
    pub schema_description: bool,
    /// Include deprecated arguments and input fields, with their deprecation.
    pub input_value_deprecation: bool,
    /// Select `isOneOf` on input objects.
    pub one_of: bool,
}

impl Default for IntrospectionOptions {
    fn default() -> Self {
        Self {
            descriptions: true,
            specified_by_url: false,
            directive_is_repeatable: false,
            schema_description: false,
            input_value_deprecation: false,
            one_of: false,
        }
    }
}

impl IntrospectionOptions {
    /// Renders the introspection query for these options.
    #[must_use]
    pub fn query(&self) -> String {
        let description = if self.descriptions { "description" } else { "" };
        let schema_description = if self.schema_description && self.descriptions {
            "description"
        } else {
            ""
        };
        let specified_by_url = if self.specified_by_url {
            "specifiedByURL"
        } else {
            ""
        };
        let is_repeatable = if self.directive_is_repeatable {
            "isRepeatable"
        } else {
            ""
        };
        let is_one_of = if self.one_of { "isOneOf" } else { "" };
        let (input_deprecated_args, input_deprecation) = if self.input_value_deprecation {
            ("(includeDeprecated: true)", "isDeprecated\n  deprecationReason")
        } else {
            ("", "")
        };

        let mut query = format!(
            r"query IntrospectionQuery {{
  __schema {{
    {schema_description}
    queryType {{ name }}
    mutationType {{ name }}
    subscriptionType {{ name }}
    types {{
      ...FullType
    }}
    directives {{
      name
      {description}
      {is_repeatable}
      locations
      args{input_deprecated_args} {{
        ...InputValue
      }}
    }}
  }}
}}

fragment FullType on __Type {{
  kind
  name
  {description}
  {specified_by_url}
  {is_one_of}
  fields(includeDeprecated: true) {{
    name
    {description}
    args{input_deprecated_args} {{
      ...InputValue
    }}
    type {{
      ...TypeRef
    }}
    isDeprecated
    deprecationReason
  }}
  inputFields{input_deprecated_args} {{
    ...InputValue
  }}
  interfaces {{
    ...TypeRef
  }}
  enumValues(includeDeprecated: true) {{
    name
    {description}
    isDeprecated
    deprecationReason
  }}
  possibleTypes {{
    ...TypeRef
  }}
}}

fragment InputValue on __InputValue {{
  name
  {description}
  type {{ ...TypeRef }}
  defaultValue
  {input_deprecation}
}}

fragment TypeRef on __Type {{
"
        );
        query.push_str(&type_ref_selection(TYPE_REF_DEPTH));
        query.push_str("}\n");

        // Drop the blank lines left behind by disabled selections.
        query
            .lines()
            .filter(|line| !line.trim().is_empty() || line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Renders `kind name ofType { ... }` nested `depth` levels deep.
fn type_ref_selection(depth: usize) -> String {
    let mut out = String::new();
    for level in 0..=depth {
        let indent = "  ".repeat(level + 1);
        out.push_str(&format!("{indent}kind\n{indent}name\n"));
        if level < depth {
            out.push_str(&format!("{indent}ofType {{\n"));
        }
    }
    for level in (0..depth).rev() {
        let indent = "  ".repeat(level + 1);
        out.push_str(&format!("{indent}}}\n"));
    }
    out
}

/// The introspection query with default [`IntrospectionOptions`].
#[must_use]
pub fn introspection_query() -> String {
    IntrospectionOptions::default().query()
}
