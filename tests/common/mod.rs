//! Shared fixtures: a small blog schema registered in the global registry
//!
//! Mirrors the usual soft-deleting blog layout: users write posts, posts
//! have comments and tags (plain and polymorphic), comments point back at
//! posts directly and through a polymorphic owner column.

use std::sync::Once;

use has_subquery::relationships::{
    global_registry, ForeignKeyConfig, ModelRegistry, PivotConfig, PolymorphicConfig,
    RelationshipMetadata, RelationshipType, ThroughConfig,
};
use has_subquery::{ModelDefinition, QueryBuilder};

static REGISTER: Once = Once::new();

pub fn registry() -> &'static ModelRegistry {
    REGISTER.call_once(|| {
        let registry = global_registry();

        registry
            .register(
                ModelDefinition::new("User", "users")
                    .with_relationship(RelationshipMetadata::new(
                        RelationshipType::HasMany,
                        "posts",
                        "Post",
                        ForeignKeyConfig::simple("author_id"),
                    ))
                    .with_relationship(
                        RelationshipMetadata::new(
                            RelationshipType::HasManyThrough,
                            "comments",
                            "Comment",
                            ForeignKeyConfig::simple("post_id"),
                        )
                        .with_through(ThroughConfig::new("posts", "author_id", "post_id")),
                    ),
            )
            .unwrap();

        registry
            .register(
                ModelDefinition::new("Post", "posts")
                    .with_soft_deletes()
                    .with_relationship(RelationshipMetadata::new(
                        RelationshipType::BelongsTo,
                        "author",
                        "User",
                        ForeignKeyConfig::simple("author_id"),
                    ))
                    .with_relationship(RelationshipMetadata::new(
                        RelationshipType::HasMany,
                        "comments",
                        "Comment",
                        ForeignKeyConfig::simple("post_id"),
                    ))
                    .with_relationship(
                        RelationshipMetadata::new(
                            RelationshipType::MorphMany,
                            "polymorphic_comments",
                            "Comment",
                            ForeignKeyConfig::simple("commentable_id"),
                        )
                        .with_polymorphic(PolymorphicConfig::new(
                            "commentable",
                            "commentable_type",
                            "commentable_id",
                        )),
                    )
                    .with_relationship(
                        RelationshipMetadata::new(
                            RelationshipType::ManyToMany,
                            "tags",
                            "Tag",
                            ForeignKeyConfig::simple("tag_id"),
                        )
                        .with_pivot(PivotConfig::new("tag_references", "post_id", "tag_id")),
                    )
                    .with_relationship(
                        RelationshipMetadata::new(
                            RelationshipType::MorphToMany,
                            "polymorphic_tags",
                            "Tag",
                            ForeignKeyConfig::simple("tag_id"),
                        )
                        .with_pivot(PivotConfig::new("tag_references", "taggable_id", "tag_id"))
                        .with_polymorphic(PolymorphicConfig::new(
                            "taggable",
                            "taggable_type",
                            "taggable_id",
                        )),
                    ),
            )
            .unwrap();

        registry
            .register(
                ModelDefinition::new("Comment", "comments")
                    .with_soft_deletes()
                    .with_relationship(RelationshipMetadata::new(
                        RelationshipType::BelongsTo,
                        "post",
                        "Post",
                        ForeignKeyConfig::simple("post_id"),
                    ))
                    .with_relationship(
                        RelationshipMetadata::new(
                            RelationshipType::MorphTo,
                            "commentable_post",
                            "Post",
                            ForeignKeyConfig::simple("commentable_id"),
                        )
                        .with_polymorphic(PolymorphicConfig::new(
                            "commentable",
                            "commentable_type",
                            "commentable_id",
                        )),
                    )
                    .with_relationship(
                        RelationshipMetadata::new(
                            RelationshipType::MorphTo,
                            "commentable",
                            "",
                            ForeignKeyConfig::simple("commentable_id"),
                        )
                        .with_polymorphic(PolymorphicConfig::new(
                            "commentable",
                            "commentable_type",
                            "commentable_id",
                        )),
                    )
                    .with_relationship(RelationshipMetadata::new(
                        RelationshipType::BelongsTo,
                        "legacy_post",
                        "Post",
                        ForeignKeyConfig::composite(vec!["post_id", "post_region"]),
                    )),
            )
            .unwrap();

        registry
            .register(ModelDefinition::new("Tag", "tags"))
            .unwrap();
    });

    global_registry()
}

pub fn query(model: &str) -> QueryBuilder {
    registry().query(model).unwrap()
}

/// Compare two SQL strings structurally, ignoring formatting differences.
pub fn assert_query_equals(expected: &str, actual: &QueryBuilder) {
    use sqlparser::dialect::GenericDialect;
    use sqlparser::parser::Parser;

    let dialect = GenericDialect {};
    let actual_sql = actual.to_sql();
    let expected_ast = Parser::parse_sql(&dialect, expected)
        .unwrap_or_else(|e| panic!("expected SQL does not parse: {}\n{}", e, expected));
    let actual_ast = Parser::parse_sql(&dialect, &actual_sql)
        .unwrap_or_else(|e| panic!("generated SQL does not parse: {}\n{}", e, actual_sql));

    assert_eq!(
        expected_ast, actual_ast,
        "\nexpected: {}\n  actual: {}",
        expected, actual_sql
    );
}
