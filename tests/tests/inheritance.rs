//! Model inheritance: merged fields, overrides, constants and registry chains.

use dirmap_registry::RegistryError;
use dirmap_tests::prelude::*;
use std::sync::Arc;

mod merging {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inherited_field_is_the_parent_definition() {
        // GIVEN User extends Person without redeclaring surname
        let person = fixtures::person_model();
        let user = ModelBuilder::new("User")
            .extends(Arc::clone(&person))
            .field("username", FieldDef::attribute("uid"))
            .finalize();

        // THEN the field definition is shared, not copied
        let parent = person.field_def("surname").unwrap();
        let child = user.field_def("surname").unwrap();
        assert!(Arc::ptr_eq(parent, child));
    }

    #[test]
    fn test_override_replaces_parent_field() {
        let person = fixtures::person_model();
        let user = fixtures::user_model();

        assert!(person.field_def("fullname").unwrap().mandatory);
        assert!(!user.field_def("fullname").unwrap().mandatory);
    }

    #[test]
    fn test_object_classes_and_constants_are_unioned() {
        let user = fixtures::user_model();

        let classes: Vec<&str> = user.object_classes.iter().map(String::as_str).collect();
        assert_eq!(
            classes,
            vec!["inetOrgPerson", "organizationalPerson", "person", "top"]
        );
        assert_eq!(user.constant("base_dn"), Some(PEOPLE_DN));
        assert_eq!(user.parents, vec!["Person".to_string()]);
    }

    #[test]
    fn test_later_parent_wins() {
        let first = Arc::new(
            ModelBuilder::new("First")
                .constant("base_dn", "ou=First,dc=example,dc=com")
                .field("name", FieldDef::attribute("cn"))
                .finalize(),
        );
        let second = Arc::new(
            ModelBuilder::new("Second")
                .constant("base_dn", "ou=Second,dc=example,dc=com")
                .field("name", FieldDef::attribute("displayName"))
                .finalize(),
        );

        let both = ModelBuilder::new("Both")
            .extends(first)
            .extends(second)
            .path("cn={name},{base_dn}")
            .finalize();

        assert_eq!(both.field_def("name").unwrap().key, "displayName");
        let entry = Entry::construct(&both, fields! { "name" => "x" }).unwrap();
        assert_eq!(entry.path(), "cn=x,ou=Second,dc=example,dc=com");
    }

    #[test]
    fn test_child_inherits_path_template() {
        let child = ModelBuilder::new("Staff")
            .extends(fixtures::person_model())
            .field("title", FieldDef::attribute("title").optional())
            .finalize();

        let result = Entry::construct(
            &child,
            fields! { "fullname" => "Jane Roe", "surname" => "Roe", "title" => "Engineer" },
        );

        Expect::new()
            .path("cn=Jane Roe,ou=People,dc=example,dc=com")
            .attribute("title", ["Engineer"])
            .object_class("person")
            .verify("inherited_path", &result)
            .unwrap();
    }
}

mod registry_chain {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_three_level_chain() {
        let registry = fixtures::registry().unwrap();
        let posix = registry.get_model("PosixUser").unwrap();

        let result = Entry::construct(
            posix.as_ref(),
            fields! {
                "username" => "jdoe",
                "fullname" => "John Doe",
                "surname" => "Doe",
                "uid_number" => 1000,
                "gid_number" => 100,
            },
        );

        Expect::new()
            .path("uid=jdoe,ou=People,dc=example,dc=com")
            .attribute("uidNumber", ["1000"])
            .attribute("loginShell", ["/bin/bash"])
            .absent("homeDirectory")
            .object_class("posixAccount")
            .object_class("inetOrgPerson")
            .object_class("person")
            .verify("posix_user", &result)
            .unwrap();

        assert!(registry.is_submodel("PosixUser", "Person"));
        assert!(!registry.is_submodel("Person", "PosixUser"));
        assert_eq!(registry.model_count(), 3);
    }

    #[test]
    fn test_unknown_parent_and_duplicate() {
        let mut builder = RegistryBuilder::new();
        let unknown = builder.add_model("Orphan").extends("Missing").done();
        assert!(matches!(
            unknown,
            Err(RegistryError::UnknownParentModel { ref parent, .. }) if parent == "Missing"
        ));

        builder.add_model("Person").done().unwrap();
        assert!(matches!(
            builder.add_model("Person").done(),
            Err(RegistryError::DuplicateModelName(ref name)) if name == "Person"
        ));
    }
}
