//! BDD step definitions for the Thruk configuration client
