//! `patterns` subcommand: registered routing keys.

use tutor_engine::Router;

use super::EXIT_OK;

pub fn run(router: &Router) -> u8 {
    let registry = router.registry();
    for key in registry.keys() {
        let name = registry
            .lookup(&key)
            .map(|p| p.name().to_string())
            .unwrap_or_default();
        println!("{:<50} {}", key.to_string(), name);
    }
    EXIT_OK
}
