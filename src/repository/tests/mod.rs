mod initialize_db_tests {
    use crate::repository::metadata_repository::get_version;
    use crate::repository::{initialize_db, DATABASE_VERSION};
    use crate::test::*;

    #[test]
    fn new_database_records_its_version() {
        let store = open_test_store();
        assert_eq!(
            Some(DATABASE_VERSION.to_string()),
            get_version(store.connection()).unwrap()
        );
    }

    #[test]
    fn initialize_db_leaves_existing_data_alone() {
        let store = open_test_store();
        let tags = create_sample_tags(&store);
        initialize_db(store.connection()).unwrap();
        let lineage = crate::tags::repository::get_lineage(tags.dogs, store.connection()).unwrap();
        assert_eq!(vec![tags.animals, tags.dogs], lineage);
    }
}

mod tag_link_tests {
    use crate::repository::TagStore;
    use crate::test::*;

    #[test]
    fn update_parent_link_moves_tag() {
        let store = open_test_store();
        let tags = create_sample_tags(&store);
        store.update_tag_parent_link(tags.cats, tags.places).unwrap();
        let children: Vec<u32> = store
            .fetch_child_tags(tags.places)
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(vec![tags.cats], children);
        assert_eq!(1, store.count_children(tags.animals).unwrap());
    }

    #[test]
    fn delete_parent_link_makes_tag_root_level() {
        let store = open_test_store();
        let tags = create_sample_tags(&store);
        store.delete_tag_parent_link(tags.dogs).unwrap();
        let roots: Vec<String> = store
            .fetch_root_tags()
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(vec!["Animals", "Dogs", "Places"], roots);
    }

    #[test]
    fn delete_tag_takes_its_links_with_it() {
        let store = open_test_store();
        let tags = create_sample_tags(&store);
        create_file_db_entry(&store, "a.jpg", &[tags.dogs, tags.cats]);
        store.delete_tag(tags.dogs).unwrap();
        assert!(!store.tag_parent_link_exists(tags.dogs).unwrap());
        assert_eq!(1, store.count_children(tags.animals).unwrap());
        assert_eq!(vec![tags.cats], store.fetch_file_tags("a.jpg").unwrap());
    }

    #[test]
    fn rename_tag_changes_only_the_name() {
        let store = open_test_store();
        let tags = create_sample_tags(&store);
        store.rename_tag(tags.dogs, "Hounds").unwrap();
        assert_eq!("Hounds", store.get_tag(tags.dogs).unwrap().unwrap().name);
        assert_eq!(vec![tags.animals, tags.dogs], store.fetch_tag_lineage(tags.dogs).unwrap());
    }
}

mod file_link_tests {
    use crate::repository::TagStore;
    use crate::test::*;

    #[test]
    fn files_uniquely_tagged_with_skips_files_with_other_tags() {
        let store = open_test_store();
        let tags = create_sample_tags(&store);
        create_file_db_entry(&store, "only_dogs.jpg", &[tags.dogs]);
        create_file_db_entry(&store, "dogs_and_cats.jpg", &[tags.dogs, tags.cats]);
        assert_eq!(
            vec!["only_dogs.jpg"],
            store.files_uniquely_tagged_with(tags.dogs).unwrap()
        );
        assert_eq!(
            vec!["dogs_and_cats.jpg", "only_dogs.jpg"],
            store.files_tagged_with(tags.dogs).unwrap()
        );
    }

    #[test]
    fn file_names_ignore_case() {
        let store = open_test_store();
        let tags = create_sample_tags(&store);
        create_file_db_entry(&store, "Beach.PNG", &[tags.places]);
        store.add_file_tag("beach.png", tags.dogs).unwrap();
        assert_eq!(vec![tags.places, tags.dogs], store.fetch_file_tags("BEACH.png").unwrap());
        store.remove_file_tag("BEACH.PNG", tags.places).unwrap();
        assert_eq!(vec![tags.dogs], store.fetch_file_tags("beach.png").unwrap());
        assert!(store.insert_file("beach.png", 0).is_err());
    }
}

mod query_files_tests {
    use crate::repository::TagStore;
    use crate::search::{FileQuery, SortMethod};
    use crate::test::*;

    #[test]
    fn empty_query_matches_nothing() {
        let store = open_test_store();
        let tags = create_sample_tags(&store);
        create_file_db_entry(&store, "a.jpg", &[tags.dogs]);
        let query = FileQuery {
            excluded: vec![tags.cats],
            ..FileQuery::default()
        };
        assert!(store.query_files(&query).unwrap().is_empty());
    }

    #[test]
    fn exclusions_win_over_inclusions() {
        let store = open_test_store();
        let tags = create_sample_tags(&store);
        create_file_db_entry(&store, "dog.jpg", &[tags.dogs]);
        create_file_db_entry(&store, "dog_at_beach.jpg", &[tags.dogs, tags.places]);
        let query = FileQuery {
            any_of: vec![tags.dogs],
            excluded: vec![tags.places],
            ..FileQuery::default()
        };
        assert_eq!(vec!["dog.jpg"], store.query_files(&query).unwrap());
    }

    #[test]
    fn empty_dimension_matches_nothing() {
        let store = open_test_store();
        let tags = create_sample_tags(&store);
        create_file_db_entry(&store, "dog.jpg", &[tags.dogs]);
        let query = FileQuery {
            all_of: vec![vec![tags.dogs], vec![]],
            ..FileQuery::default()
        };
        assert!(store.query_files(&query).unwrap().is_empty());
    }

    #[test]
    fn any_and_all_combine() {
        let store = open_test_store();
        let tags = create_sample_tags(&store);
        create_file_db_entry(&store, "cat.jpg", &[tags.cats]);
        create_file_db_entry(&store, "cat_at_beach.jpg", &[tags.cats, tags.places]);
        create_file_db_entry(&store, "dog_at_beach.jpg", &[tags.dogs, tags.places]);
        let query = FileQuery {
            any_of: vec![tags.cats],
            all_of: vec![vec![tags.places]],
            excluded: vec![],
            sort: SortMethod::Name,
        };
        assert_eq!(vec!["cat_at_beach.jpg"], store.query_files(&query).unwrap());
    }
}
