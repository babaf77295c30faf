// src/lib.rs
//
// Os módulos vivem na lib para os testes de integração conseguirem
// usar os serviços e o router; o binário (main.rs) só faz o arranque.

pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod templates;
pub mod web;
