mod detail_tests;
