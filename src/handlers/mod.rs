// handlers/mod.rs - Two-tier handler layout
//
// Public (no token) → Protected (token validated against the auth service,
// then ownership checked before anything reaches the file service).
pub mod public;    // /api/v1/signup, /api/v1/login, /api/v1/checkToken, /api/v1/version
pub mod protected; // /api/v1/:username/:doc_id, /api/v1/:username/_all_docs

/*
REQUEST FLOW FOR PROTECTED HANDLERS:

1. Path parameters are checked for emptiness       → 400
2. middleware::authorize asks the auth service     → 401 / 502 / ...
3. Path owner is compared to the identity          → 403
4. The file service is called                      → its error, unchanged
5. The backend payload is returned as-is           → 200

Every step is awaited in order. Step 4 needs the identity from step 2, so
the two upstream calls are never issued concurrently. Errors travel as
ApiError until axum turns them into {"error": message}.
*/
