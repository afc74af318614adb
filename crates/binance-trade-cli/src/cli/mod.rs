/*
[INPUT]:  Loaded AppConfig and a constructed BinanceClient
[OUTPUT]: Interactive menu loop
[POS]:    CLI module root
[UPDATE]: When adding CLI entry points
*/

pub mod interactive;

pub use interactive::run_interactive;
