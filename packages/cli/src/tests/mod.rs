mod files_tests;
