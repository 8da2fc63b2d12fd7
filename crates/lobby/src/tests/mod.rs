//! Service-Tests des Lobby-Kerns

mod mock;

mod matchmaker_tests;
