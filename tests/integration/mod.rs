//! Integration Tests Module
//!
//! End-to-end tests for CrimeBoard: the agent pipeline with scripted agents,
//! board assembly, the lane layout, the case analysis service, and the HTTP
//! agent client against a mock server.

mod common;

// Seven-stage pipeline with scripted agents
mod orchestration_test;

// Stage merge and evidence reconciliation
mod assembly_test;

// Lane layout properties
mod layout_test;

// Case lifecycle through the analysis service
mod analysis_service_test;

// HTTP agent client and response parsing
mod agent_client_test;
