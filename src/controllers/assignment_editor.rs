//! Editor de atribuciones de una ruta
//!
//! Copia local y editable de los pasajeros de la ruta seleccionada. La orden
//! de embarque siempre queda numerada 0..n-1 después de mover o quitar.

use std::collections::BTreeSet;

use crate::dto::route_dto::FuncionarioRotaEdicaoPayload;
use crate::models::employee::Funcionario;
use crate::models::route::{compare_boarding_order, AtribuicaoRota, PapelAtribuicao};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentItem {
    pub funcionario_id: i64,
    pub papel: PapelAtribuicao,
    pub ordem_embarque: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentEditor {
    items: Vec<AssignmentItem>,
    selected: BTreeSet<i64>,
}

impl AssignmentEditor {
    /// Ordena por orden de embarque (sin orden al final) y conserva la orden
    /// existente; las que no tienen reciben su posición.
    pub fn from_assignments(atribuicoes: &[AtribuicaoRota]) -> Self {
        let mut sorted: Vec<&AtribuicaoRota> = atribuicoes.iter().collect();
        sorted.sort_by(|a, b| compare_boarding_order(a.ordem_embarque, b.ordem_embarque));

        let items = sorted
            .into_iter()
            .enumerate()
            .map(|(index, atribuicao)| AssignmentItem {
                funcionario_id: atribuicao.funcionario_id,
                papel: atribuicao.papel,
                ordem_embarque: atribuicao.ordem_embarque.unwrap_or(index as i32),
            })
            .collect();

        Self {
            items,
            selected: BTreeSet::new(),
        }
    }

    pub fn items(&self) -> &[AssignmentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, funcionario_id: i64) -> bool {
        self.items.iter().any(|item| item.funcionario_id == funcionario_id)
    }

    fn renumber(&mut self) {
        for (ordem, item) in self.items.iter_mut().enumerate() {
            item.ordem_embarque = ordem as i32;
        }
    }

    /// Arrastrar `from` hasta `to`. Devuelve `false` si no hubo cambio.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from == to || from >= self.items.len() || to >= self.items.len() {
            return false;
        }
        let moved = self.items.remove(from);
        self.items.insert(to, moved);
        self.renumber();
        true
    }

    /// Agregar como pasajero al final
    pub fn add(&mut self, funcionario_id: i64) -> bool {
        if self.contains(funcionario_id) {
            return false;
        }
        self.items.push(AssignmentItem {
            funcionario_id,
            papel: PapelAtribuicao::Passageiro,
            ordem_embarque: self.items.len() as i32,
        });
        true
    }

    pub fn remove(&mut self, funcionario_id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.funcionario_id != funcionario_id);
        self.selected.remove(&funcionario_id);
        if self.items.len() == before {
            return false;
        }
        self.renumber();
        true
    }

    pub fn set_role(&mut self, funcionario_id: i64, papel: PapelAtribuicao) -> bool {
        match self.items.iter_mut().find(|item| item.funcionario_id == funcionario_id) {
            Some(item) => {
                item.papel = papel;
                true
            }
            None => false,
        }
    }

    /// Marcar/desmarcar para remanejamiento
    pub fn toggle_selected(&mut self, funcionario_id: i64) {
        if !self.selected.remove(&funcionario_id) && self.contains(funcionario_id) {
            self.selected.insert(funcionario_id);
        }
    }

    pub fn selected_ids(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn payload(&self) -> Vec<FuncionarioRotaEdicaoPayload> {
        self.items
            .iter()
            .map(|item| FuncionarioRotaEdicaoPayload {
                funcionario_id: item.funcionario_id,
                papel: item.papel,
                ordem_embarque: Some(item.ordem_embarque),
            })
            .collect()
    }

    /// Funcionarios de la empresa que todavía no están en la ruta
    pub fn available_employees<'a>(&self, funcionarios: &'a [Funcionario]) -> Vec<&'a Funcionario> {
        funcionarios.iter().filter(|f| !self.contains(f.id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atribuicao(funcionario_id: i64, ordem: Option<i32>) -> AtribuicaoRota {
        AtribuicaoRota {
            id: funcionario_id + 100,
            rota_id: 1,
            funcionario_id,
            papel: PapelAtribuicao::Passageiro,
            ordem_embarque: ordem,
            hora_embarque: None,
            latitude: None,
            longitude: None,
        }
    }

    fn ids(editor: &AssignmentEditor) -> Vec<i64> {
        editor.items().iter().map(|item| item.funcionario_id).collect()
    }

    fn orders(editor: &AssignmentEditor) -> Vec<i32> {
        editor.items().iter().map(|item| item.ordem_embarque).collect()
    }

    #[test]
    fn test_initial_order_keeps_existing_and_fills_index() {
        let editor = AssignmentEditor::from_assignments(&[
            atribuicao(30, None),
            atribuicao(10, Some(5)),
            atribuicao(20, Some(1)),
        ]);

        assert_eq!(ids(&editor), vec![20, 10, 30]);
        assert_eq!(orders(&editor), vec![1, 5, 2]);
    }

    #[test]
    fn test_drag_first_to_third_renumbers() {
        let mut editor = AssignmentEditor::from_assignments(&[
            atribuicao(0, Some(0)),
            atribuicao(1, Some(1)),
            atribuicao(2, Some(2)),
            atribuicao(3, Some(3)),
        ]);

        assert!(editor.move_item(0, 2));
        assert_eq!(ids(&editor), vec![1, 2, 0, 3]);
        assert_eq!(orders(&editor), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_move_noops() {
        let mut editor = AssignmentEditor::from_assignments(&[atribuicao(1, Some(4)), atribuicao(2, Some(9))]);
        assert!(!editor.move_item(1, 1));
        assert!(!editor.move_item(0, 2));
        assert_eq!(orders(&editor), vec![4, 9]);
    }

    #[test]
    fn test_add_and_remove() {
        let mut editor = AssignmentEditor::from_assignments(&[atribuicao(1, Some(0)), atribuicao(2, Some(1))]);

        assert!(editor.add(3));
        assert!(!editor.add(3));
        assert_eq!(editor.items()[2].papel, PapelAtribuicao::Passageiro);
        assert_eq!(editor.items()[2].ordem_embarque, 2);

        editor.toggle_selected(1);
        assert!(editor.remove(1));
        assert!(!editor.remove(1));
        assert_eq!(ids(&editor), vec![2, 3]);
        assert_eq!(orders(&editor), vec![0, 1]);
        assert!(editor.selected_ids().is_empty());
    }

    #[test]
    fn test_selection_only_tracks_members() {
        let mut editor = AssignmentEditor::from_assignments(&[atribuicao(1, Some(0)), atribuicao(2, Some(1))]);
        editor.toggle_selected(2);
        editor.toggle_selected(99);
        assert_eq!(editor.selected_ids(), vec![2]);
        editor.toggle_selected(2);
        assert!(editor.selected_ids().is_empty());
    }

    #[test]
    fn test_payload_carries_role_and_order() {
        let mut editor = AssignmentEditor::from_assignments(&[atribuicao(1, None)]);
        editor.set_role(1, PapelAtribuicao::Motorista);

        assert_eq!(
            editor.payload(),
            vec![FuncionarioRotaEdicaoPayload {
                funcionario_id: 1,
                papel: PapelAtribuicao::Motorista,
                ordem_embarque: Some(0),
            }]
        );
    }
}
