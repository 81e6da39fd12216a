//! SDL (Schema Definition Language) printing for client schemas.

use crate::schema::{
    ClientSchema, Deprecation, Directive, EnumType, Field, InputObjectType, InputValue,
    InterfaceType, NamedType, ObjectType, ScalarType, UnionType,
};
use crate::strings::{print_description, print_string};

/// Scalars every GraphQL schema has; printing them would be redundant.
const BUILTIN_SCALARS: &[&str] = &["String", "Int", "Float", "Boolean", "ID"];

/// Directives defined by the GraphQL specification itself.
const BUILTIN_DIRECTIVES: &[&str] = &["include", "skip", "deprecated", "specifiedBy", "oneOf"];

/// Prints a client schema as SDL.
///
/// Output follows the conventional printer layout:
/// - a `schema { ... }` block only when the root types are not named
///   `Query`/`Mutation`/`Subscription` or the schema has a description
/// - custom directives, then named types in introspection order
/// - built-in scalars, built-in directives and `__` introspection types are
///   left out
/// - definitions are separated by a blank line, with no trailing newline
///
/// # Examples
///
/// ```
/// # use shopify_introspect::{print_schema, ClientSchema};
/// # use serde_json::json;
/// let data = json!({
///     "__schema": {
///         "queryType": { "name": "Query" },
///         "types": [
///             {
///                 "kind": "OBJECT",
///                 "name": "Query",
///                 "fields": [{
///                     "name": "hello",
///                     "args": [],
///                     "type": { "kind": "SCALAR", "name": "String" }
///                 }],
///                 "interfaces": []
///             },
///             { "kind": "SCALAR", "name": "String" }
///         ],
///         "directives": []
///     }
/// });
/// let schema = ClientSchema::from_data(&data)?;
/// assert_eq!(print_schema(&schema), "type Query {\n  hello: String\n}");
/// # Ok::<(), shopify_introspect::IntrospectionError>(())
/// ```
#[must_use]
#[tracing::instrument(skip(schema), fields(
    types = schema.types().len(),
    directives = schema.directives().len()
))]
pub fn print_schema(schema: &ClientSchema) -> String {
    let mut definitions = Vec::new();

    if let Some(schema_definition) = print_schema_definition(schema) {
        definitions.push(schema_definition);
    }

    definitions.extend(
        schema
            .directives()
            .iter()
            .filter(|directive| !BUILTIN_DIRECTIVES.contains(&directive.name.as_str()))
            .map(print_directive),
    );

    definitions.extend(
        schema
            .types()
            .iter()
            .filter(|ty| !is_builtin_type(ty.name()))
            .map(print_type),
    );

    let sdl = definitions.join("\n\n");
    tracing::debug!(
        definitions = definitions.len(),
        sdl_length = sdl.len(),
        "SDL printed"
    );
    sdl
}

fn is_builtin_type(name: &str) -> bool {
    name.starts_with("__") || BUILTIN_SCALARS.contains(&name)
}

fn print_schema_definition(schema: &ClientSchema) -> Option<String> {
    let roots = [
        ("query", schema.query_type(), "Query"),
        ("mutation", schema.mutation_type(), "Mutation"),
        ("subscription", schema.subscription_type(), "Subscription"),
    ];

    let common_names = roots
        .iter()
        .all(|(_, name, conventional)| name.is_none() || *name == Some(*conventional));

    if schema.description().is_none() && common_names {
        return None;
    }

    let operations: Vec<String> = roots
        .iter()
        .filter_map(|(operation, name, _)| name.map(|name| format!("  {operation}: {name}")))
        .collect();

    Some(format!(
        "{}schema {{\n{}\n}}",
        print_description(schema.description(), "", true),
        operations.join("\n")
    ))
}

fn print_type(ty: &NamedType) -> String {
    match ty {
        NamedType::Scalar(t) => print_scalar(t),
        NamedType::Object(t) => print_object(t),
        NamedType::Interface(t) => print_interface(t),
        NamedType::Union(t) => print_union(t),
        NamedType::Enum(t) => print_enum(t),
        NamedType::InputObject(t) => print_input_object(t),
    }
}

fn print_scalar(ty: &ScalarType) -> String {
    let specified_by = ty
        .specified_by_url
        .as_deref()
        .map(|url| format!(" @specifiedBy(url: {})", print_string(url)))
        .unwrap_or_default();

    format!(
        "{}scalar {}{specified_by}",
        print_description(ty.description.as_deref(), "", true),
        ty.name
    )
}

fn print_object(ty: &ObjectType) -> String {
    format!(
        "{}type {}{}{}",
        print_description(ty.description.as_deref(), "", true),
        ty.name,
        print_implemented_interfaces(&ty.interfaces),
        print_fields(&ty.fields)
    )
}

fn print_interface(ty: &InterfaceType) -> String {
    format!(
        "{}interface {}{}{}",
        print_description(ty.description.as_deref(), "", true),
        ty.name,
        print_implemented_interfaces(&ty.interfaces),
        print_fields(&ty.fields)
    )
}

fn print_union(ty: &UnionType) -> String {
    let members = if ty.members.is_empty() {
        String::new()
    } else {
        format!(" = {}", ty.members.join(" | "))
    };

    format!(
        "{}union {}{members}",
        print_description(ty.description.as_deref(), "", true),
        ty.name
    )
}

fn print_enum(ty: &EnumType) -> String {
    let values: Vec<String> = ty
        .values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            format!(
                "{}  {}{}",
                print_description(value.description.as_deref(), "  ", i == 0),
                value.name,
                print_deprecated(value.deprecation.as_ref())
            )
        })
        .collect();

    format!(
        "{}enum {}{}",
        print_description(ty.description.as_deref(), "", true),
        ty.name,
        print_block(&values)
    )
}

fn print_input_object(ty: &InputObjectType) -> String {
    let fields: Vec<String> = ty
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            format!(
                "{}  {}",
                print_description(field.description.as_deref(), "  ", i == 0),
                print_input_value(field)
            )
        })
        .collect();

    let one_of = if ty.one_of { " @oneOf" } else { "" };

    format!(
        "{}input {}{one_of}{}",
        print_description(ty.description.as_deref(), "", true),
        ty.name,
        print_block(&fields)
    )
}

fn print_directive(directive: &Directive) -> String {
    let repeatable = if directive.repeatable {
        " repeatable"
    } else {
        ""
    };

    format!(
        "{}directive @{}{}{repeatable} on {}",
        print_description(directive.description.as_deref(), "", true),
        directive.name,
        print_args(&directive.args, ""),
        directive.locations.join(" | ")
    )
}

fn print_implemented_interfaces(interfaces: &[String]) -> String {
    if interfaces.is_empty() {
        String::new()
    } else {
        format!(" implements {}", interfaces.join(" & "))
    }
}

fn print_fields(fields: &[Field]) -> String {
    let lines: Vec<String> = fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            format!(
                "{}  {}{}: {}{}",
                print_description(field.description.as_deref(), "  ", i == 0),
                field.name,
                print_args(&field.args, "  "),
                field.ty,
                print_deprecated(field.deprecation.as_ref())
            )
        })
        .collect();

    print_block(&lines)
}

/// ` {` + one item per line + `}`; nothing at all for an empty list.
fn print_block(items: &[String]) -> String {
    if items.is_empty() {
        String::new()
    } else {
        format!(" {{\n{}\n}}", items.join("\n"))
    }
}

/// Arguments go on one line unless any of them is described.
fn print_args(args: &[InputValue], indent: &str) -> String {
    if args.is_empty() {
        return String::new();
    }

    if args.iter().all(|arg| arg.description.is_none()) {
        let args: Vec<String> = args.iter().map(print_input_value).collect();
        return format!("({})", args.join(", "));
    }

    let inner_indent = format!("  {indent}");
    let lines: Vec<String> = args
        .iter()
        .enumerate()
        .map(|(i, arg)| {
            format!(
                "{}{inner_indent}{}",
                print_description(arg.description.as_deref(), &inner_indent, i == 0),
                print_input_value(arg)
            )
        })
        .collect();

    format!("(\n{}\n{indent})", lines.join("\n"))
}

fn print_input_value(value: &InputValue) -> String {
    let default = value
        .default_value
        .as_deref()
        .map(|default| format!(" = {default}"))
        .unwrap_or_default();

    format!(
        "{}: {}{default}{}",
        value.name,
        value.ty,
        print_deprecated(value.deprecation.as_ref())
    )
}

fn print_deprecated(deprecation: Option<&Deprecation>) -> String {
    match deprecation {
        None => String::new(),
        Some(deprecation) => match deprecation.explicit_reason() {
            Some(reason) => format!(" @deprecated(reason: {})", print_string(reason)),
            None => " @deprecated".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn named(kind: &str, name: &str) -> Value {
        json!({ "kind": kind, "name": name, "ofType": null })
    }

    fn non_null(inner: Value) -> Value {
        json!({ "kind": "NON_NULL", "name": null, "ofType": inner })
    }

    fn list(inner: Value) -> Value {
        json!({ "kind": "LIST", "name": null, "ofType": inner })
    }

    fn arg(name: &str, description: Option<&str>, ty: Value, default: Option<&str>) -> Value {
        json!({
            "name": name,
            "description": description,
            "type": ty,
            "defaultValue": default
        })
    }

    fn field(name: &str, description: Option<&str>, args: &[Value], ty: Value) -> Value {
        json!({
            "name": name,
            "description": description,
            "args": args,
            "type": ty,
            "isDeprecated": false,
            "deprecationReason": null
        })
    }

    fn scalar(name: &str) -> Value {
        json!({ "kind": "SCALAR", "name": name, "description": null })
    }

    fn object(name: &str, fields: &[Value]) -> Value {
        json!({
            "kind": "OBJECT",
            "name": name,
            "description": null,
            "fields": fields,
            "interfaces": []
        })
    }

    fn print(query: &str, types: &[Value], directives: &[Value]) -> String {
        let data = json!({
            "__schema": {
                "queryType": { "name": query },
                "mutationType": null,
                "subscriptionType": null,
                "types": types,
                "directives": directives
            }
        });
        print_schema(&ClientSchema::from_data(&data).unwrap())
    }

    fn builtins() -> Vec<Value> {
        vec![
            scalar("String"),
            scalar("Boolean"),
            scalar("ID"),
            scalar("Int"),
            object(
                "__Schema",
                &[field("description", None, &[], named("SCALAR", "String"))],
            ),
        ]
    }

    #[test]
    fn test_conventional_root_omits_schema_block() {
        let mut types = vec![object(
            "Query",
            &[field("ok", None, &[], non_null(named("SCALAR", "Boolean")))],
        )];
        types.extend(builtins());

        assert_eq!(print("Query", &types, &[]), "type Query {\n  ok: Boolean!\n}");
    }

    #[test]
    fn test_custom_root_prints_schema_block() {
        let mut types = vec![object(
            "QueryRoot",
            &[field("ok", None, &[], named("SCALAR", "Boolean"))],
        )];
        types.extend(builtins());

        assert_eq!(
            print("QueryRoot", &types, &[]),
            "schema {\n  query: QueryRoot\n}\n\ntype QueryRoot {\n  ok: Boolean\n}"
        );
    }

    #[test]
    fn test_described_fields_and_args() {
        let mut types = vec![json!({
            "kind": "OBJECT",
            "name": "Query",
            "description": "The schema's entry-point for queries.",
            "fields": [
                field(
                    "product",
                    Some("Returns a Product resource by ID."),
                    &[arg("id", Some("The ID of the Product to return."), non_null(named("SCALAR", "ID")), None)],
                    named("OBJECT", "Product")
                ),
                field(
                    "products",
                    Some("Returns a list of products."),
                    &[
                        arg("first", None, named("SCALAR", "Int"), Some("10")),
                        arg("query", None, named("SCALAR", "String"), None)
                    ],
                    non_null(list(non_null(named("OBJECT", "Product"))))
                )
            ],
            "interfaces": []
        })];
        types.push(object(
            "Product",
            &[field("id", None, &[], non_null(named("SCALAR", "ID")))],
        ));
        types.extend(builtins());

        let expected = r#""""The schema's entry-point for queries."""
type Query {
  """Returns a Product resource by ID."""
  product(
    """The ID of the Product to return."""
    id: ID!
  ): Product

  """Returns a list of products."""
  products(first: Int = 10, query: String): [Product!]!
}

type Product {
  id: ID!
}"#;
        assert_eq!(print("Query", &types, &[]), expected);
    }

    #[test]
    fn test_interfaces_unions_enums_inputs() {
        let mut types = vec![
            object(
                "Query",
                &[
                    field("node", None, &[arg("id", None, non_null(named("SCALAR", "ID")), None)], named("INTERFACE", "Node")),
                    field("media", None, &[arg("filter", None, named("INPUT_OBJECT", "MediaFilter"), None)], named("UNION", "Media")),
                ],
            ),
            json!({
                "kind": "INTERFACE",
                "name": "Node",
                "fields": [field("id", None, &[], non_null(named("SCALAR", "ID")))],
                "interfaces": [],
                "possibleTypes": [named("OBJECT", "Video")]
            }),
            json!({
                "kind": "OBJECT",
                "name": "Video",
                "fields": [field("id", None, &[], non_null(named("SCALAR", "ID")))],
                "interfaces": [named("INTERFACE", "Node")]
            }),
            json!({
                "kind": "OBJECT",
                "name": "Model3d",
                "fields": [field("id", None, &[], non_null(named("SCALAR", "ID")))],
                "interfaces": [named("INTERFACE", "Node")]
            }),
            json!({
                "kind": "UNION",
                "name": "Media",
                "possibleTypes": [named("OBJECT", "Video"), named("OBJECT", "Model3d")]
            }),
            json!({
                "kind": "ENUM",
                "name": "MediaContentType",
                "description": "The possible content types for a media object.",
                "enumValues": [
                    { "name": "VIDEO", "description": null, "isDeprecated": false, "deprecationReason": null },
                    { "name": "MODEL_3D", "description": "A 3d model.", "isDeprecated": false, "deprecationReason": null },
                    { "name": "IMAGE", "description": null, "isDeprecated": true, "deprecationReason": "No longer supported" },
                    { "name": "EXTERNAL_VIDEO", "description": null, "isDeprecated": true, "deprecationReason": "Use `VIDEO`." }
                ]
            }),
            json!({
                "kind": "INPUT_OBJECT",
                "name": "MediaFilter",
                "inputFields": [
                    arg("contentType", None, named("ENUM", "MediaContentType"), Some("VIDEO")),
                    arg("ids", Some("Only these IDs."), list(non_null(named("SCALAR", "ID"))), None)
                ]
            }),
        ];
        types.extend(builtins());

        let expected = r#"type Query {
  node(id: ID!): Node
  media(filter: MediaFilter): Media
}

interface Node {
  id: ID!
}

type Video implements Node {
  id: ID!
}

type Model3d implements Node {
  id: ID!
}

union Media = Video | Model3d

"""The possible content types for a media object."""
enum MediaContentType {
  VIDEO

  """A 3d model."""
  MODEL_3D
  IMAGE @deprecated
  EXTERNAL_VIDEO @deprecated(reason: "Use `VIDEO`.")
}

input MediaFilter {
  contentType: MediaContentType = VIDEO

  """Only these IDs."""
  ids: [ID!]
}"#;
        assert_eq!(print("Query", &types, &[]), expected);
    }

    #[test]
    fn test_custom_scalars_and_directives() {
        let mut types = vec![
            object(
                "Query",
                &[field("updatedAt", None, &[], named("SCALAR", "DateTime"))],
            ),
            json!({
                "kind": "SCALAR",
                "name": "DateTime",
                "description": "An ISO-8601 encoded UTC date time string.",
                "specifiedByURL": "https://www.rfc-editor.org/rfc/rfc3339"
            }),
        ];
        types.extend(builtins());

        let directives = [
            json!({
                "name": "deprecated",
                "description": "Marks an element as no longer supported.",
                "locations": ["FIELD_DEFINITION", "ENUM_VALUE"],
                "args": [arg("reason", None, named("SCALAR", "String"), Some("\"No longer supported\""))]
            }),
            json!({
                "name": "accessRestricted",
                "description": "Marks an element of a GraphQL schema as having restricted access.",
                "locations": ["FIELD_DEFINITION", "OBJECT"],
                "args": [arg("reason", Some("Explains the reason around this restriction"), named("SCALAR", "String"), Some("null"))]
            }),
            json!({
                "name": "tag",
                "isRepeatable": true,
                "locations": ["OBJECT"],
                "args": [arg("name", None, non_null(named("SCALAR", "String")), None)]
            }),
        ];

        let expected = r#""""Marks an element of a GraphQL schema as having restricted access."""
directive @accessRestricted(
  """Explains the reason around this restriction"""
  reason: String = null
) on FIELD_DEFINITION | OBJECT

directive @tag(name: String!) repeatable on OBJECT

type Query {
  updatedAt: DateTime
}

"""An ISO-8601 encoded UTC date time string."""
scalar DateTime @specifiedBy(url: "https://www.rfc-editor.org/rfc/rfc3339")"#;
        assert_eq!(print("Query", &types, &directives), expected);
    }

    #[test]
    fn test_empty_object_and_union() {
        let mut types = vec![
            object("Query", &[]),
            json!({ "kind": "UNION", "name": "Nothing", "possibleTypes": [] }),
        ];
        types.extend(builtins());

        assert_eq!(print("Query", &types, &[]), "type Query\n\nunion Nothing");
    }

    #[test]
    fn test_multiline_description_and_escaping() {
        let mut types = vec![json!({
            "kind": "OBJECT",
            "name": "Query",
            "description": "First line.\nSecond line.",
            "fields": [field("legacy", Some("\nStarts blank"), &[], named("SCALAR", "String"))],
            "interfaces": []
        })];
        types.extend(builtins());

        let expected = "\"\"\"\nFirst line.\nSecond line.\n\"\"\"\ntype Query {\n  \"\\nStarts blank\"\n  legacy: String\n}";
        assert_eq!(print("Query", &types, &[]), expected);
    }
}
