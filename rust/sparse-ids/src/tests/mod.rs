mod sparse_ids_list_tests;
