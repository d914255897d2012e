// Test modules for Consent Gate
// Each module covers one source module; shared fixtures live in `helpers`

mod helpers;
