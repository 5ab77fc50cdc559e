use crate::generate::{
    ComposedGenerator, FilteredGenerator, GenerateError, MethodsOfSubclassesGenerator,
    ModelGenerator, NamePattern,
};
use crate::model::{AnnotationSpecification, WhitelistSpecification};
use crate::profiles::{Profile, ProfileOverrides};
use crate::query::TypeIndex;

/// Resolver methods are named `resolve_<field>` by framework convention.
pub const RESOLVER_PATTERN: &str = "resolve_.*";
/// Mutator entry points are always the `mutate` method of a mutation class.
pub const MUTATOR_PATTERN: &str = "\\.mutate$";

const OBJECT_TYPE_BASES: &[&str] = &["graphene.types.objecttype.ObjectType", "graphene.ObjectType"];
const MUTATION_BASES: &[&str] = &["graphene.types.mutation.Mutation", "graphene.Mutation"];

/// The framework hands every resolver a context/info argument of this type;
/// it is framework plumbing, not user input.
const RESOLVE_INFO_TYPE: &str = "graphql.execution.base.ResolveInfo";

/// GraphQL framework convention: resolver methods on object types and
/// mutator methods on mutation types are user-facing entry points.
pub struct GraphQlProfile;

impl GraphQlProfile {
    /// Receivers plus the framework's resolve-info context parameter.
    pub fn default_whitelist() -> WhitelistSpecification {
        WhitelistSpecification::receivers().with_parameter_type(RESOLVE_INFO_TYPE)
    }
}

impl Profile for GraphQlProfile {
    fn name(&self) -> &'static str {
        "graphql"
    }

    fn description(&self) -> &'static str {
        "GraphQL resolver and mutator methods on graphene subclasses"
    }

    fn build<'a>(
        &self,
        index: &'a dyn TypeIndex,
        overrides: &ProfileOverrides,
    ) -> Result<Box<dyn ModelGenerator + 'a>, GenerateError> {
        let annotations =
            overrides.annotations.clone().unwrap_or_else(AnnotationSpecification::entrypoint);
        let whitelist = overrides.whitelist.clone().unwrap_or_else(Self::default_whitelist);

        let resolvers = FilteredGenerator::matching_name(
            MethodsOfSubclassesGenerator::new(
                index,
                base_classes(OBJECT_TYPE_BASES),
                annotations.clone(),
                whitelist.clone(),
            )?,
            NamePattern::new(RESOLVER_PATTERN)?,
        );
        let mutators = FilteredGenerator::matching_name(
            MethodsOfSubclassesGenerator::new(
                index,
                base_classes(MUTATION_BASES),
                annotations,
                whitelist,
            )?,
            NamePattern::new(MUTATOR_PATTERN)?,
        );

        Ok(Box::new(ComposedGenerator::new(vec![Box::new(resolvers), Box::new(mutators)])))
    }
}

fn base_classes(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}
