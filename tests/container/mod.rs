mod hash_functions_tests;
mod hash_table_handle_tests;
