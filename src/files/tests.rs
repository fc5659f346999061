mod import_file_tests {
    use crate::files::service::import_file;
    use crate::files::FileRecord;
    use crate::model::error::file_errors::ImportFileError;
    use crate::repository::TagStore;
    use crate::test::*;

    #[test]
    fn import_file_saves_file_and_tags() {
        let store = open_test_store();
        let tags = create_sample_tags(&store);
        let file = import_file(&store, "a.jpg", 1_700_000_000, &[tags.dogs, tags.places]).unwrap();
        assert_eq!(
            FileRecord {
                id: Some(1),
                name: "a.jpg".to_string(),
                created: 1_700_000_000
            },
            file
        );
        assert_eq!(Some(file), store.get_file("A.JPG").unwrap());
        assert_eq!(vec![tags.places, tags.dogs], store.fetch_file_tags("a.jpg").unwrap());
    }

    #[test]
    fn import_file_invalid_name() {
        let store = open_test_store();
        let tags = create_sample_tags(&store);
        for name in ["", "  ", "photos/a.jpg", "photos\\a.jpg"] {
            let res = import_file(&store, name, 0, &[tags.dogs]);
            assert_eq!(Err(ImportFileError::InvalidName), res, "{name:?}");
        }
    }

    #[test]
    fn import_file_unsupported_type() {
        let store = open_test_store();
        let tags = create_sample_tags(&store);
        for name in ["notes.txt", "README", ".png"] {
            let res = import_file(&store, name, 0, &[tags.dogs]);
            assert_eq!(Err(ImportFileError::UnsupportedType), res, "{name}");
        }
    }

    #[test]
    fn import_file_needs_tags() {
        let store = open_test_store();
        assert_eq!(Err(ImportFileError::NoTags), import_file(&store, "a.jpg", 0, &[]));
    }

    #[test]
    fn import_file_already_exists() {
        let store = open_test_store();
        let tags = create_sample_tags(&store);
        create_file_db_entry(&store, "a.jpg", &[tags.dogs]);
        assert_eq!(
            Err(ImportFileError::AlreadyExists),
            import_file(&store, "A.jpg", 0, &[tags.cats])
        );
        assert_eq!(vec![tags.dogs], store.fetch_file_tags("a.jpg").unwrap());
    }

    #[test]
    fn import_file_tag_checks() {
        let store = open_test_store();
        let tags = create_sample_tags(&store);
        assert_eq!(
            Err(ImportFileError::TagNotFound),
            import_file(&store, "a.jpg", 0, &[tags.dogs, 99])
        );
        assert_eq!(
            Err(ImportFileError::TagNotLeaf),
            import_file(&store, "a.jpg", 0, &[tags.animals])
        );
        assert_eq!(None, store.get_file("a.jpg").unwrap());
    }
}

mod rename_file_tests {
    use crate::files::service::rename_file;
    use crate::model::error::file_errors::UpdateFileError;
    use crate::repository::TagStore;
    use crate::test::*;

    #[test]
    fn rename_file_keeps_tags() {
        let store = open_test_store();
        let tags = create_sample_tags(&store);
        create_file_db_entry(&store, "a.jpg", &[tags.dogs]);
        rename_file(&store, "a.jpg", "rex.jpg").unwrap();
        assert_eq!(None, store.get_file("a.jpg").unwrap());
        assert_eq!(vec![tags.dogs], store.fetch_file_tags("rex.jpg").unwrap());
    }

    #[test]
    fn rename_file_case_only() {
        let store = open_test_store();
        let tags = create_sample_tags(&store);
        create_file_db_entry(&store, "a.jpg", &[tags.dogs]);
        rename_file(&store, "a.jpg", "A.JPG").unwrap();
        assert_eq!("A.JPG", store.get_file("a.jpg").unwrap().unwrap().name);
    }

    #[test]
    fn rename_file_errors() {
        let store = open_test_store();
        let tags = create_sample_tags(&store);
        create_file_db_entry(&store, "a.jpg", &[tags.dogs]);
        create_file_db_entry(&store, "b.jpg", &[tags.dogs]);
        assert_eq!(Err(UpdateFileError::NotFound), rename_file(&store, "c.jpg", "d.jpg"));
        assert_eq!(Err(UpdateFileError::InvalidName), rename_file(&store, "a.jpg", "x/a.jpg"));
        assert_eq!(Err(UpdateFileError::UnsupportedType), rename_file(&store, "a.jpg", "a.exe"));
        assert_eq!(Err(UpdateFileError::AlreadyExists), rename_file(&store, "a.jpg", "B.jpg"));
    }
}

mod delete_file_tests {
    use crate::files::service::delete_file;
    use crate::model::error::file_errors::DeleteFileError;
    use crate::repository::TagStore;
    use crate::test::*;

    #[test]
    fn delete_file_removes_tags_too() {
        let store = open_test_store();
        let tags = create_sample_tags(&store);
        create_file_db_entry(&store, "a.jpg", &[tags.dogs]);
        delete_file(&store, "a.jpg").unwrap();
        assert_eq!(None, store.get_file("a.jpg").unwrap());
        assert!(store.files_tagged_with(tags.dogs).unwrap().is_empty());
    }

    #[test]
    fn delete_file_not_found() {
        let store = open_test_store();
        assert_eq!(Err(DeleteFileError::NotFound), delete_file(&store, "a.jpg"));
    }
}

mod file_tag_tests {
    use crate::files::service::{add_tag_to_file, get_file_tags, remove_tag_from_file};
    use crate::model::error::file_errors::FileTagError;
    use crate::test::*;

    #[test]
    fn add_tag_to_file_only_takes_leaves() {
        let store = open_test_store();
        let tags = create_sample_tags(&store);
        create_file_db_entry(&store, "a.jpg", &[tags.dogs]);
        add_tag_to_file(&store, "a.jpg", tags.places).unwrap();
        // already there, nothing changes
        add_tag_to_file(&store, "a.jpg", tags.places).unwrap();
        assert_eq!(vec![tags.places, tags.dogs], get_file_tags(&store, "a.jpg").unwrap());
        assert_eq!(
            Err(FileTagError::TagNotLeaf),
            add_tag_to_file(&store, "a.jpg", tags.animals)
        );
        assert_eq!(Err(FileTagError::TagNotFound), add_tag_to_file(&store, "a.jpg", 99));
        assert_eq!(
            Err(FileTagError::FileNotFound),
            add_tag_to_file(&store, "b.jpg", tags.dogs)
        );
    }

    #[test]
    fn remove_tag_from_file_keeps_the_last_tag() {
        let store = open_test_store();
        let tags = create_sample_tags(&store);
        create_file_db_entry(&store, "a.jpg", &[tags.dogs, tags.cats]);
        remove_tag_from_file(&store, "a.jpg", tags.dogs).unwrap();
        assert_eq!(vec![tags.cats], get_file_tags(&store, "a.jpg").unwrap());
        assert_eq!(
            Err(FileTagError::LastTag),
            remove_tag_from_file(&store, "a.jpg", tags.cats)
        );
        // not on the file at all
        remove_tag_from_file(&store, "a.jpg", tags.places).unwrap();
        assert_eq!(vec![tags.cats], get_file_tags(&store, "a.jpg").unwrap());
    }

    #[test]
    fn get_file_tags_missing_file() {
        let store = open_test_store();
        assert_eq!(Err(FileTagError::FileNotFound), get_file_tags(&store, "a.jpg"));
    }
}
