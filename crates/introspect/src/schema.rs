//! Client schema construction from introspection results.
//!
//! [`ClientSchema`] is the checked, immutable form of an introspection
//! result. Building one resolves every type reference against the returned
//! type list, so a schema that was built successfully can always be printed.

use crate::response::check_response;
use crate::types::{
    IntrospectionDirective, IntrospectionEnumValue, IntrospectionField, IntrospectionInputValue,
    IntrospectionQueryData, IntrospectionType, IntrospectionTypeRef, TypeKind,
};
use crate::{IntrospectionError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Reason the `@deprecated` directive uses when none is given.
pub const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

/// A schema reconstructed from an introspection result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSchema {
    description: Option<String>,
    query_type: Option<String>,
    mutation_type: Option<String>,
    subscription_type: Option<String>,
    types: Vec<NamedType>,
    directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamedType {
    Scalar(ScalarType),
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    Enum(EnumType),
    InputObject(InputObjectType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarType {
    pub name: String,
    pub description: Option<String>,
    pub specified_by_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceType {
    pub name: String,
    pub description: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionType {
    pub name: String,
    pub description: Option<String>,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    pub name: String,
    pub description: Option<String>,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<InputValue>,
    pub one_of: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub description: Option<String>,
    pub args: Vec<InputValue>,
    pub ty: TypeRef,
    pub deprecation: Option<Deprecation>,
}

/// An argument or input object field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputValue {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeRef,
    /// Default value as a GraphQL literal, exactly as the server printed it.
    pub default_value: Option<String>,
    pub deprecation: Option<Deprecation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub description: Option<String>,
    pub deprecation: Option<Deprecation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
    pub description: Option<String>,
    pub args: Vec<InputValue>,
    pub repeatable: bool,
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deprecation {
    pub reason: Option<String>,
}

impl Deprecation {
    fn from_introspection(is_deprecated: bool, reason: Option<&String>) -> Option<Self> {
        (is_deprecated || reason.is_some()).then(|| Self {
            reason: reason.cloned(),
        })
    }

    /// The reason to print, `None` when it is absent or the default.
    #[must_use]
    pub fn explicit_reason(&self) -> Option<&str> {
        self.reason
            .as_deref()
            .filter(|reason| *reason != DEFAULT_DEPRECATION_REASON)
    }
}

/// A resolved type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// Name of the innermost named type.
    #[must_use]
    pub fn named_type(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::NonNull(inner) => inner.named_type(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

impl NamedType {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(t) => &t.name,
            Self::Object(t) => &t.name,
            Self::Interface(t) => &t.name,
            Self::Union(t) => &t.name,
            Self::Enum(t) => &t.name,
            Self::InputObject(t) => &t.name,
        }
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Scalar(t) => t.description.as_deref(),
            Self::Object(t) => t.description.as_deref(),
            Self::Interface(t) => t.description.as_deref(),
            Self::Union(t) => t.description.as_deref(),
            Self::Enum(t) => t.description.as_deref(),
            Self::InputObject(t) => t.description.as_deref(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Object(_) => TypeKind::Object,
            Self::Interface(_) => TypeKind::Interface,
            Self::Union(_) => TypeKind::Union,
            Self::Enum(_) => TypeKind::Enum,
            Self::InputObject(_) => TypeKind::InputObject,
        }
    }
}

impl ClientSchema {
    /// Builds a schema from a full response body (`{ "data": ..., "errors": ... }`).
    ///
    /// The body goes through [`check_response`] first, so a response that
    /// carries errors never produces a schema.
    pub fn from_response(body: &Value) -> Result<Self> {
        let data = check_response(body)?;
        Self::from_data(data)
    }

    /// Builds a schema from the `data` field of an introspection response.
    ///
    /// # Errors
    ///
    /// Returns [`IntrospectionError::Invalid`] when `__schema` is missing, a
    /// required introspection field is missing, or the types do not form a
    /// consistent schema.
    #[tracing::instrument(skip(data))]
    pub fn from_data(data: &Value) -> Result<Self> {
        if matches!(data.get("__schema"), None | Some(Value::Null)) {
            return Err(IntrospectionError::invalid(
                "missing `__schema`. Pass the `data` field of an introspection \
                 response that returned no errors",
            ));
        }

        let introspection = IntrospectionQueryData::deserialize_value(data)?;
        Self::from_introspection(&introspection)
    }

    /// Builds a schema from already deserialized introspection data.
    pub fn from_introspection(introspection: &IntrospectionQueryData) -> Result<Self> {
        let raw = &introspection.schema;

        let mut kinds = HashMap::with_capacity(raw.types.len());
        for ty in &raw.types {
            if ty.kind.is_wrapper() {
                return Err(IntrospectionError::invalid(format!(
                    "type `{}` has wrapper kind {} in the type list",
                    ty.name, ty.kind
                )));
            }
            if kinds.insert(ty.name.as_str(), ty.kind).is_some() {
                return Err(IntrospectionError::invalid(format!(
                    "type `{}` is defined more than once",
                    ty.name
                )));
            }
        }

        let resolver = Resolver { kinds: &kinds };

        let types = raw
            .types
            .iter()
            .map(|ty| resolver.named_type(ty))
            .collect::<Result<Vec<_>>>()?;

        let directives = raw
            .directives
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|directive| resolver.directive(directive))
            .collect::<Result<Vec<_>>>()?;

        let root = |operation: &str, name: Option<&String>| -> Result<Option<String>> {
            name.map(|name| -> Result<String> {
                resolver.expect_kind(name, TypeKind::Object, &format!("{operation} root"))?;
                Ok(name.clone())
            })
            .transpose()
        };

        let schema = Self {
            description: raw.description.clone(),
            query_type: root("query", raw.query_type.as_ref().map(|t| &t.name))?,
            mutation_type: root("mutation", raw.mutation_type.as_ref().map(|t| &t.name))?,
            subscription_type: root(
                "subscription",
                raw.subscription_type.as_ref().map(|t| &t.name),
            )?,
            types,
            directives,
        };

        tracing::debug!(
            types = schema.types.len(),
            directives = schema.directives.len(),
            "Built client schema"
        );

        Ok(schema)
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn query_type(&self) -> Option<&str> {
        self.query_type.as_deref()
    }

    #[must_use]
    pub fn mutation_type(&self) -> Option<&str> {
        self.mutation_type.as_deref()
    }

    #[must_use]
    pub fn subscription_type(&self) -> Option<&str> {
        self.subscription_type.as_deref()
    }

    /// Every named type, in introspection order.
    #[must_use]
    pub fn types(&self) -> &[NamedType] {
        &self.types
    }

    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&NamedType> {
        self.types.iter().find(|ty| ty.name() == name)
    }

    #[must_use]
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }
}

impl IntrospectionQueryData {
    fn deserialize_value(data: &Value) -> Result<Self> {
        Self::deserialize(data).map_err(|e| IntrospectionError::invalid(e.to_string()))
    }
}

/// Resolves raw introspection entries against the schema's type list.
struct Resolver<'a> {
    kinds: &'a HashMap<&'a str, TypeKind>,
}

impl Resolver<'_> {
    fn kind_of(&self, name: &str) -> Result<TypeKind> {
        self.kinds.get(name).copied().ok_or_else(|| {
            IntrospectionError::invalid(format!(
                "unknown type `{name}`. Ensure that a full introspection query is used"
            ))
        })
    }

    fn expect_kind(&self, name: &str, expected: TypeKind, role: &str) -> Result<()> {
        let kind = self.kind_of(name)?;
        if kind == expected {
            Ok(())
        } else {
            Err(IntrospectionError::invalid(format!(
                "{role} `{name}` must be {expected}, found {kind}"
            )))
        }
    }

    fn named_type(&self, ty: &IntrospectionType) -> Result<NamedType> {
        let name = ty.name.clone();
        let description = ty.description.clone();

        let named = match ty.kind {
            TypeKind::Scalar => NamedType::Scalar(ScalarType {
                name,
                description,
                specified_by_url: ty.specified_by_url.clone(),
            }),
            TypeKind::Object => NamedType::Object(ObjectType {
                interfaces: self.interfaces(ty, required(ty.interfaces.as_ref(), ty, "interfaces")?)?,
                fields: self.fields(ty)?,
                name,
                description,
            }),
            TypeKind::Interface => NamedType::Interface(InterfaceType {
                interfaces: self.interfaces(ty, ty.interfaces.as_deref().unwrap_or_default())?,
                fields: self.fields(ty)?,
                name,
                description,
            }),
            TypeKind::Union => {
                let possible = required(ty.possible_types.as_ref(), ty, "possibleTypes")?;
                let members = possible
                    .iter()
                    .map(|member| {
                        let member = self.named_ref(member)?;
                        self.expect_kind(&member, TypeKind::Object, "union member")?;
                        Ok(member)
                    })
                    .collect::<Result<Vec<_>>>()?;
                NamedType::Union(UnionType {
                    name,
                    description,
                    members,
                })
            }
            TypeKind::Enum => {
                let values = required(ty.enum_values.as_ref(), ty, "enumValues")?
                    .iter()
                    .map(enum_value)
                    .collect();
                NamedType::Enum(EnumType {
                    name,
                    description,
                    values,
                })
            }
            TypeKind::InputObject => {
                let fields = required(ty.input_fields.as_ref(), ty, "inputFields")?
                    .iter()
                    .map(|field| self.input_value(field, &ty.name))
                    .collect::<Result<Vec<_>>>()?;
                NamedType::InputObject(InputObjectType {
                    name,
                    description,
                    fields,
                    one_of: ty.is_one_of.unwrap_or(false),
                })
            }
            TypeKind::List | TypeKind::NonNull => {
                return Err(IntrospectionError::invalid(format!(
                    "type `{}` has wrapper kind {} in the type list",
                    ty.name, ty.kind
                )));
            }
        };

        Ok(named)
    }

    fn interfaces(
        &self,
        ty: &IntrospectionType,
        refs: &[IntrospectionTypeRef],
    ) -> Result<Vec<String>> {
        refs.iter()
            .map(|iface| {
                let iface = self.named_ref(iface)?;
                self.expect_kind(
                    &iface,
                    TypeKind::Interface,
                    &format!("interface implemented by `{}`", ty.name),
                )?;
                Ok(iface)
            })
            .collect()
    }

    fn fields(&self, ty: &IntrospectionType) -> Result<Vec<Field>> {
        required(ty.fields.as_ref(), ty, "fields")?
            .iter()
            .map(|field| self.field(field, &ty.name))
            .collect()
    }

    fn field(&self, field: &IntrospectionField, parent: &str) -> Result<Field> {
        let location = format!("{parent}.{}", field.name);
        let args = field
            .args
            .as_ref()
            .ok_or_else(|| {
                IntrospectionError::invalid(format!("field `{location}` is missing `args`"))
            })?
            .iter()
            .map(|arg| self.input_value(arg, &location))
            .collect::<Result<Vec<_>>>()?;

        let ty = self.type_ref(&field.type_ref)?;
        let kind = self.kind_of(ty.named_type())?;
        if !kind.is_output() {
            return Err(IntrospectionError::invalid(format!(
                "field `{location}` must have an output type, found {kind} `{}`",
                ty.named_type()
            )));
        }

        Ok(Field {
            name: field.name.clone(),
            description: field.description.clone(),
            args,
            ty,
            deprecation: Deprecation::from_introspection(
                field.is_deprecated,
                field.deprecation_reason.as_ref(),
            ),
        })
    }

    fn input_value(&self, value: &IntrospectionInputValue, parent: &str) -> Result<InputValue> {
        let ty = self.type_ref(&value.type_ref)?;
        let kind = self.kind_of(ty.named_type())?;
        if !kind.is_input() {
            return Err(IntrospectionError::invalid(format!(
                "input value `{parent}.{}` must have an input type, found {kind} `{}`",
                value.name,
                ty.named_type()
            )));
        }

        Ok(InputValue {
            name: value.name.clone(),
            description: value.description.clone(),
            ty,
            default_value: value.default_value.clone(),
            deprecation: Deprecation::from_introspection(
                value.is_deprecated,
                value.deprecation_reason.as_ref(),
            ),
        })
    }

    fn directive(&self, directive: &IntrospectionDirective) -> Result<Directive> {
        let location = format!("@{}", directive.name);
        let args = directive
            .args
            .as_ref()
            .ok_or_else(|| {
                IntrospectionError::invalid(format!("directive `{location}` is missing `args`"))
            })?
            .iter()
            .map(|arg| self.input_value(arg, &location))
            .collect::<Result<Vec<_>>>()?;
        let locations = directive.locations.clone().ok_or_else(|| {
            IntrospectionError::invalid(format!("directive `{location}` is missing `locations`"))
        })?;

        Ok(Directive {
            name: directive.name.clone(),
            description: directive.description.clone(),
            args,
            repeatable: directive.is_repeatable,
            locations,
        })
    }

    /// Resolves a reference that must point at a named type.
    fn named_ref(&self, type_ref: &IntrospectionTypeRef) -> Result<String> {
        match self.type_ref(type_ref)? {
            TypeRef::Named(name) => Ok(name),
            wrapped => Err(IntrospectionError::invalid(format!(
                "expected a named type, found `{wrapped}`"
            ))),
        }
    }

    fn type_ref(&self, type_ref: &IntrospectionTypeRef) -> Result<TypeRef> {
        match type_ref.kind {
            TypeKind::List => Ok(TypeRef::List(Box::new(
                self.type_ref(of_type(type_ref)?)?,
            ))),
            TypeKind::NonNull => {
                let inner = of_type(type_ref)?;
                if inner.kind == TypeKind::NonNull {
                    return Err(IntrospectionError::invalid(
                        "NON_NULL type reference wraps another NON_NULL",
                    ));
                }
                Ok(TypeRef::NonNull(Box::new(self.type_ref(inner)?)))
            }
            _ => {
                let name = type_ref.name.as_ref().ok_or_else(|| {
                    IntrospectionError::invalid(format!(
                        "{} type reference is missing `name`",
                        type_ref.kind
                    ))
                })?;
                self.kind_of(name)?;
                Ok(TypeRef::Named(name.clone()))
            }
        }
    }
}

fn of_type(type_ref: &IntrospectionTypeRef) -> Result<&IntrospectionTypeRef> {
    type_ref.of_type.as_deref().ok_or_else(|| {
        IntrospectionError::invalid(format!(
            "{} type reference is missing `ofType`",
            type_ref.kind
        ))
    })
}

fn required<'t, T>(
    list: Option<&'t Vec<T>>,
    ty: &IntrospectionType,
    what: &str,
) -> Result<&'t [T]> {
    list.map(Vec::as_slice).ok_or_else(|| {
        IntrospectionError::invalid(format!(
            "{} type `{}` is missing `{what}`",
            ty.kind, ty.name
        ))
    })
}

fn enum_value(value: &IntrospectionEnumValue) -> EnumValue {
    EnumValue {
        name: value.name.clone(),
        description: value.description.clone(),
        deprecation: Deprecation::from_introspection(
            value.is_deprecated,
            value.deprecation_reason.as_ref(),
        ),
    }
}
