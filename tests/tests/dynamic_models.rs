//! Models generated from directory schema.

use dirmap_core::FieldDef;
use dirmap_schema::SchemaResult;
use dirmap_tests::prelude::*;
use std::collections::BTreeMap;

/// Provider that answers every request with the same fields.
struct FixedProvider(BTreeMap<String, FieldDef>);

impl SchemaProvider for FixedProvider {
    fn fields_for(&self, _: &[String]) -> SchemaResult<BTreeMap<String, FieldDef>> {
        Ok(self.0.clone())
    }
}

fn field_names(model: &ModelDef) -> Vec<&str> {
    model.fields.keys().map(String::as_str).collect()
}

mod factory {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inet_user_from_fixed_provider() {
        // GIVEN a provider reporting uid and mail for inetUser
        let provider = FixedProvider(
            [
                ("uid".to_string(), FieldDef::attribute("uid")),
                ("mail".to_string(), FieldDef::attribute("mail").optional()),
            ]
            .into_iter()
            .collect(),
        );

        // WHEN a model is generated
        let model = DynamicModelFactory::build(
            "uid={uid},ou=People,dc=example,dc=com",
            ["inetUser"],
            &provider,
        )
        .unwrap();

        // THEN it has exactly those fields and a derived name
        assert_eq!(model.name, "InetUser");
        assert_eq!(field_names(&model), vec!["mail", "uid"]);
        assert!(model.object_classes.contains("inetUser"));

        let entry = Entry::construct(&model, fields! { "uid" => "guest" }).unwrap();
        assert_eq!(entry.path(), "uid=guest,ou=People,dc=example,dc=com");
    }

    #[test]
    fn test_provider_failure_propagates() {
        let schema = fixtures::sample_schema().unwrap();

        let result = DynamicModelFactory::build("cn={cn},dc=example,dc=com", ["nosuchClass"], &schema);

        assert!(matches!(
            result,
            Err(SchemaLookupError::UnknownObjectClass { ref name }) if name == "nosuchClass"
        ));
    }
}

mod schema {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inet_user_from_schema() {
        let schema = fixtures::sample_schema().unwrap();

        let model =
            DynamicModelFactory::build("uid={uid},{base_dn}", ["inetUser"], &schema).unwrap();

        assert_eq!(
            field_names(&model),
            vec!["inetUserHttpURL", "inetUserStatus", "uid", "userPassword"]
        );
        assert!(model.fields.values().all(|def| !def.mandatory));
    }

    #[test]
    fn test_person_chain_and_aliases() {
        let schema = fixtures::sample_schema().unwrap();

        let model = DynamicModelFactory::builder(
            "uid={uid},{base_dn}",
            ["inetOrgPerson"],
            &schema,
        )
        .unwrap()
        .constant("base_dn", PEOPLE_DN)
        .finalize();

        assert_eq!(model.name, "InetOrgPerson");
        assert!(model.fields["cn"].mandatory);
        assert!(model.fields["sn"].mandatory);
        assert!(!model.fields["uid"].mandatory);
        assert!(!model.fields.contains_key("objectClass"));

        let result = Entry::construct(
            &model,
            fields! { "cn" => "John Doe", "sn" => "Doe", "uid" => "jdoe" },
        );

        Expect::new()
            .path("uid=jdoe,ou=People,dc=example,dc=com")
            .attribute("commonName", ["John Doe"])
            .attribute("surname", ["Doe"])
            .attribute("userid", ["jdoe"])
            .object_class("inetOrgPerson")
            .verify("inet_org_person", &result)
            .unwrap();
    }

    #[test]
    fn test_mandatory_wins_across_classes() {
        let schema = fixtures::sample_schema().unwrap();

        let model = DynamicModelFactory::build(
            "uid={uid},{base_dn}",
            ["inetOrgPerson", "posixAccount"],
            &schema,
        )
        .unwrap();

        assert_eq!(model.name, "InetOrgPerson_posixAccount");
        assert!(model.fields["uid"].mandatory);
        assert!(model.fields["homeDirectory"].mandatory);
        assert!(!model.fields["loginShell"].mandatory);
    }

    #[test]
    fn test_single_value_attribute_rejects_lists() {
        let schema = fixtures::sample_schema().unwrap();
        let model = DynamicModelFactory::builder("uid={uid},{base_dn}", ["posixAccount"], &schema)
            .unwrap()
            .constant("base_dn", PEOPLE_DN)
            .finalize();

        let result = Entry::construct(
            &model,
            fields! {
                "cn" => "svc",
                "uid" => "svc",
                "uidNumber" => vec![1000, 1001],
                "gidNumber" => 100,
                "homeDirectory" => "/srv/svc",
            },
        );

        Expect::new()
            .error_pattern(r"attribute 'uidNumber' and value '\[1000, 1001\]': expected a single value")
            .verify("single_value", &result)
            .unwrap();
    }

    #[test]
    fn test_schema_from_json() {
        let json = r#"{
            "objectClasses": [
                "( 2.5.6.0 NAME 'top' ABSTRACT MUST objectClass )",
                "( 2.5.6.9 NAME 'groupOfNames' SUP top STRUCTURAL MUST ( member $ cn ) MAY description )"
            ],
            "attributeTypes": [
                "( 2.5.4.3 NAME ( 'cn' 'commonName' ) SUP name )"
            ],
            "ldapSyntaxes": []
        }"#;
        let schema = DirectorySchema::from_json(json).unwrap();

        let model = DynamicModelFactory::build("cn={cn},ou=Groups,dc=example,dc=com", ["groupOfNames"], &schema)
            .unwrap();

        assert_eq!(field_names(&model), vec!["cn", "description", "member"]);
        assert!(matches!(
            DirectorySchema::from_json("{ not json"),
            Err(SchemaLookupError::Json(_))
        ));
    }
}
