//! Asset contract operations.
//!
//! Each operation is a thin sequence over the `WorldState` API: check
//! existence, encode or decode the record, put/get/delete. The world state
//! belongs to one transaction; nothing here commits or rolls back.

use assetchain_hostapi::WorldState;
use tracing::{debug, info};

use crate::asset::{seed_assets, Asset};
use crate::error::{ContractError, ContractResult};

/// The asset contract.
///
/// Stateless — all state is accessed through the `WorldState` passed to
/// each call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmartContract;

impl SmartContract {
    /// Write the seed assets to world state.
    pub fn init_ledger(&self, state: &mut dyn WorldState) -> ContractResult<()> {
        let assets = seed_assets();
        for asset in &assets {
            let bytes = asset.to_json()?;
            state
                .put_state(&asset.id, &bytes)
                .map_err(ContractError::PutState)?;
        }
        info!(tx_id = state.tx_id(), count = assets.len(), "ledger initialized");
        Ok(())
    }

    /// Issue a new asset. Fails if the ID is already in use.
    pub fn create_asset(&self, state: &mut dyn WorldState, asset: Asset) -> ContractResult<()> {
        if self.asset_exists(state, &asset.id)? {
            return Err(ContractError::AlreadyExists(asset.id));
        }
        let bytes = asset.to_json()?;
        state.put_state(&asset.id, &bytes)?;
        debug!(tx_id = state.tx_id(), id = %asset.id, "asset created");
        Ok(())
    }

    /// Return the asset stored under `id`.
    pub fn read_asset(&self, state: &dyn WorldState, id: &str) -> ContractResult<Asset> {
        let bytes = state
            .get_state(id)
            .map_err(ContractError::ReadState)?
            .ok_or_else(|| ContractError::NotFound(id.to_string()))?;
        Ok(Asset::from_json(&bytes)?)
    }

    /// Replace an existing asset with `asset`. Every field is overwritten.
    pub fn update_asset(&self, state: &mut dyn WorldState, asset: Asset) -> ContractResult<()> {
        if !self.asset_exists(state, &asset.id)? {
            return Err(ContractError::NotFound(asset.id));
        }
        let bytes = asset.to_json()?;
        state.put_state(&asset.id, &bytes)?;
        debug!(tx_id = state.tx_id(), id = %asset.id, "asset updated");
        Ok(())
    }

    pub fn delete_asset(&self, state: &mut dyn WorldState, id: &str) -> ContractResult<()> {
        if !self.asset_exists(state, id)? {
            return Err(ContractError::NotFound(id.to_string()));
        }
        state.del_state(id)?;
        debug!(tx_id = state.tx_id(), id, "asset deleted");
        Ok(())
    }

    pub fn asset_exists(&self, state: &dyn WorldState, id: &str) -> ContractResult<bool> {
        let bytes = state.get_state(id).map_err(ContractError::ReadState)?;
        Ok(bytes.is_some())
    }

    /// Set a new manufacter on the asset and return the previous one.
    pub fn transfer_asset(
        &self,
        state: &mut dyn WorldState,
        id: &str,
        new_manufacter: &str,
    ) -> ContractResult<String> {
        let mut asset = self.read_asset(state, id)?;
        let previous = std::mem::replace(&mut asset.manufacter, new_manufacter.to_string());
        let bytes = asset.to_json()?;
        state.put_state(id, &bytes)?;
        info!(
            tx_id = state.tx_id(),
            id,
            from = %previous,
            to = new_manufacter,
            "asset transferred"
        );
        Ok(previous)
    }

    /// Every asset in the namespace, in key order.
    pub fn get_all_assets(&self, state: &dyn WorldState) -> ContractResult<Vec<Asset>> {
        let mut assets = Vec::new();
        for entry in state.get_state_by_range("", "")? {
            let entry = entry?;
            assets.push(Asset::from_json(&entry.value)?);
        }
        Ok(assets)
    }
}
