//! Adding, searching and deleting constructed entries through a session.

use dirmap_session::ConfigError;
use dirmap_tests::prelude::*;

const CONFIG: &str = r#"{
    "url": "ldap://localhost:389",
    "base_dn": "dc=example, dc=com",
    "username": "cn=admin,dc=example,dc=com",
    "password": "secret",
    "userconfig": {
        "people_dn": "ou=People,dc=example,dc=com",
        "groups_dn": "ou=Groups,dc=example,dc=com"
    }
}"#;

fn directory() -> Directory<RecordingSession> {
    Directory::new(RecordingSession::new(), Config::from_json(CONFIG).unwrap())
}

/// A user model whose base comes from the configuration.
fn configured_user(config: &Config) -> ModelDef {
    ModelBuilder::new("User")
        .path("uid={uid},{people_dn}")
        .constants(config.constants())
        .object_classes(["top", "inetOrgPerson"])
        .field("username", FieldDef::attribute("uid"))
        .field("fullname", FieldDef::attribute("cn"))
        .field("surname", FieldDef::attribute("sn"))
        .finalize()
}

mod config {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_constants_from_userconfig() {
        let config = Config::from_json(CONFIG).unwrap();
        let constants = config.constants();

        assert_eq!(constants["base_dn"], BASE_DN);
        assert_eq!(constants["people_dn"], PEOPLE_DN);
        assert!(!format!("{:?}", config).contains("secret"));
    }

    #[test]
    fn test_invalid_configurations() {
        assert!(matches!(
            Config::from_json(r#"{"base_dn": "dc=example,dc=com", "pythonpaths": []}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"base_dn": "dc=example,,dc=com"}"#),
            Err(ConfigError::InvalidBaseDn { .. })
        ));
    }
}

mod operations {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_search_delete() {
        // GIVEN a directory and a user model configured from it
        let mut directory = directory();
        let model = configured_user(directory.config());
        let entry = Entry::construct(
            &model,
            fields! { "username" => "jdoe", "fullname" => "John Doe", "surname" => "Doe" },
        )
        .unwrap();

        // WHEN the entry is added and searched for
        directory.add(&entry).unwrap();
        let uid = model.field("username").unwrap();
        let found = directory
            .search(uid.equals("jdoe"), SearchScope::Subtree)
            .unwrap();

        // THEN the stored entry comes back with its object classes
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, "uid=jdoe,ou=People,dc=example,dc=com");
        assert_eq!(found[0].get("CN"), Some(&["John Doe".to_string()][..]));
        assert_eq!(
            found[0].get("objectClass"),
            Some(&["inetOrgPerson".to_string(), "top".to_string()][..])
        );

        // AND deleting removes it
        directory.delete(&entry).unwrap();
        let session = directory.into_session();
        assert_eq!(session.entry_count(), 0);
        assert_eq!(
            session.operations,
            vec![
                Operation::Add {
                    path: "uid=jdoe,ou=People,dc=example,dc=com".to_string(),
                    object_classes: ["inetOrgPerson", "top"].iter().map(|s| s.to_string()).collect(),
                    attributes: entry.protocol_attributes(),
                },
                Operation::Search {
                    base: BASE_DN.to_string(),
                    filter: "(uid=jdoe)".to_string(),
                    scope: SearchScope::Subtree,
                },
                Operation::Delete {
                    path: "uid=jdoe,ou=People,dc=example,dc=com".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_parameters_are_not_sent() {
        let mut directory = directory();
        let entry = Entry::construct(
            &fixtures::automount_model(),
            fields! { "key" => "/home", "info" => "nfs:/home", "autofile" => "auto_home" },
        )
        .unwrap();

        directory.add(&entry).unwrap();

        let stored = directory
            .session()
            .entry("cn=/home,ou=auto_home,cn=automount,dc=example,dc=com")
            .unwrap();
        assert!(stored.get("automap").is_none());
        assert!(stored.get("autofile").is_none());
        assert_eq!(stored.get("automountInformation"), Some(&["nfs:/home".to_string()][..]));
    }

    #[test]
    fn test_rejections_surface_as_errors() {
        let mut directory = directory();
        let model = configured_user(directory.config());
        let entry = Entry::construct(
            &model,
            fields! { "username" => "jdoe", "fullname" => "John Doe", "surname" => "Doe" },
        )
        .unwrap();

        directory.add(&entry).unwrap();
        let duplicate = directory.add(&entry);
        directory.delete(&entry).unwrap();
        let missing = directory.delete(&entry);

        assert!(matches!(
            duplicate,
            Err(SessionError::Rejected { ref message, .. }) if message == "entryAlreadyExists"
        ));
        assert!(matches!(
            missing,
            Err(SessionError::Rejected { ref message, .. }) if message == "noSuchObject"
        ));
    }

    #[test]
    fn test_search_scopes_and_raw_filters() {
        let mut directory = directory();
        let model = configured_user(directory.config());
        for name in ["alice", "bob"] {
            let entry = Entry::construct(
                &model,
                fields! { "username" => name, "fullname" => name, "surname" => name },
            )
            .unwrap();
            directory.add(&entry).unwrap();
        }

        let below_people = directory
            .search_from(PEOPLE_DN, "(objectClass=inetOrgPerson)", SearchScope::OneLevel)
            .unwrap();
        let at_base = directory
            .search("(objectClass=*)", SearchScope::Base)
            .unwrap();

        assert_eq!(below_people.len(), 2);
        assert!(at_base.is_empty());
    }
}
